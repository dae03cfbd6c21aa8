//! AI drafting assistance with a deterministic fallback.
//!
//! Generation is best-effort: when the upstream model is unreachable or
//! misconfigured, callers fall back to [`fallback_content`], so the assist
//! endpoint never fails outright.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::Error;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
  /// Draft HTML blog content for the given title and category.
  async fn generate(
    &self,
    title: &str,
    category: &str,
    subtitle: Option<&str>,
  ) -> Result<String, Error>;
}

// ─── Gemini ──────────────────────────────────────────────────────────────────

/// Generates drafts through the Gemini REST API.
pub struct GeminiGenerator {
  client:  reqwest::Client,
  api_key: String,
  model:   String,
}

impl GeminiGenerator {
  pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(30))
      .build()
      .map_err(|e| Error::Upstream(format!("failed to build http client: {e}")))?;
    Ok(GeminiGenerator {
      client,
      api_key: api_key.into(),
      model: model.into(),
    })
  }
}

fn build_prompt(title: &str, category: &str, subtitle: Option<&str>) -> String {
  let mut prompt = format!(
    "Write a complete, engaging blog post with the title \"{title}\" in the \
     {category} category."
  );
  if let Some(subtitle) = subtitle {
    prompt.push_str(&format!(" The subtitle is \"{subtitle}\"."));
  }
  prompt.push_str(
    " Format the post as clean HTML using <h2> for section headings, <h3> for \
     sub-headings, and <p> for paragraphs. Aim for 500-800 words. Start with \
     an <h2>Introduction</h2> section and end with a conclusion. Return only \
     the HTML content, no markdown and no commentary.",
  );
  prompt
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
  async fn generate(
    &self,
    title: &str,
    category: &str,
    subtitle: Option<&str>,
  ) -> Result<String, Error> {
    let url = format!(
      "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
      self.model, self.api_key
    );
    let body = json!({
      "contents": [{ "parts": [{ "text": build_prompt(title, category, subtitle) }] }]
    });

    let resp = self
      .client
      .post(&url)
      .json(&body)
      .send()
      .await
      .map_err(|e| Error::Upstream(format!("generation request failed: {e}")))?;

    if !resp.status().is_success() {
      return Err(Error::Upstream(format!(
        "generation request failed with status {}",
        resp.status()
      )));
    }

    let value = resp
      .json::<Value>()
      .await
      .map_err(|e| Error::Upstream(format!("malformed generation response: {e}")))?;

    value["candidates"][0]["content"]["parts"][0]["text"]
      .as_str()
      .map(str::to_string)
      .ok_or_else(|| Error::Upstream("generation response carried no text".into()))
  }
}

// ─── Disabled ────────────────────────────────────────────────────────────────

/// Stand-in when no API key is configured; always errs so callers take the
/// fallback path.
pub struct DisabledGenerator;

#[async_trait]
impl ContentGenerator for DisabledGenerator {
  async fn generate(
    &self,
    _title: &str,
    _category: &str,
    _subtitle: Option<&str>,
  ) -> Result<String, Error> {
    Err(Error::Upstream("content generation is not configured".into()))
  }
}

// ─── Fallback ────────────────────────────────────────────────────────────────

/// Deterministic template used when generation fails. Same inputs always
/// produce the same HTML.
pub fn fallback_content(title: &str, category: &str) -> String {
  let topic = category.to_lowercase();
  format!(
    "<h2>Introduction</h2>\
     <p>Welcome to this post about {title}. In the world of {topic}, there is \
     always something new to explore, and today we take a closer look at what \
     makes this subject worth your attention.</p>\
     <h2>Why {title} Matters</h2>\
     <p>Every topic in {topic} has its own story, and {title} is no exception. \
     Understanding the fundamentals helps you build a clearer picture and make \
     better decisions along the way.</p>\
     <h2>Key Takeaways</h2>\
     <p>Start with the basics and build up gradually. Keep notes of what works \
     for you, revisit them often, and do not be afraid to experiment.</p>\
     <h2>Conclusion</h2>\
     <p>That wraps up our look at {title}. We hope this overview of {topic} \
     gave you a useful starting point. Check back soon for more.</p>"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fallback_is_deterministic() {
    let a = fallback_content("Sourdough Basics", "Food");
    let b = fallback_content("Sourdough Basics", "Food");
    assert_eq!(a, b);
  }

  #[test]
  fn fallback_mentions_title_and_lowercased_category() {
    let html = fallback_content("Sourdough Basics", "Food");
    assert!(html.starts_with("<h2>Introduction</h2>"));
    assert!(html.contains("Sourdough Basics"));
    assert!(html.contains("food"));
    assert!(!html.contains("Food"));
  }

  #[test]
  fn prompt_includes_subtitle_only_when_present() {
    let with = build_prompt("T", "Tech", Some("S"));
    assert!(with.contains("subtitle is \"S\""));
    let without = build_prompt("T", "Tech", None);
    assert!(!without.contains("subtitle"));
  }
}
