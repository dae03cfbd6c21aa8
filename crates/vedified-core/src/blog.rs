//! BlogPost — the unit of published content.
//!
//! The at-rest invariant is publish-gated: a published post must carry a
//! non-empty image URL, while a draft may lack one. Creation applies a
//! stricter on-ingest rule (see [`NewBlog::validate`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A blog post as stored and served.
///
/// `image` is the durable URL produced by the external upload step; this
/// crate never sees image bytes. `author_email` is `None` on legacy rows
/// created before author scoping existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
  pub blog_id:      Uuid,
  pub title:        String,
  pub subtitle:     String,
  /// HTML body.
  pub description:  String,
  pub category:     String,
  pub image:        String,
  pub is_published: bool,
  pub author_email: Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

impl BlogPost {
  /// The publish-gated invariant: published posts must have an image.
  pub fn can_publish(&self) -> bool { !self.image.trim().is_empty() }
}

/// Input for creating a post.
///
/// All missing string fields default to empty so validation can name every
/// absent field at once instead of failing on the first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
  #[serde(default)]
  pub title:        String,
  #[serde(default)]
  pub subtitle:     String,
  #[serde(default)]
  pub description:  String,
  #[serde(default)]
  pub category:     String,
  #[serde(default)]
  pub image:        String,
  #[serde(default)]
  pub is_published: bool,
  /// Set by the server from the authenticated identity, never by clients.
  #[serde(skip)]
  pub author_email: Option<String>,
}

impl NewBlog {
  /// The on-ingest rule: every field, image included, must be non-empty at
  /// create time. Stricter than the at-rest invariant on purpose.
  pub fn validate(&self) -> Result<()> {
    let mut missing = Vec::new();
    if self.title.trim().is_empty() {
      missing.push("title");
    }
    if self.subtitle.trim().is_empty() {
      missing.push("subtitle");
    }
    if self.description.trim().is_empty() {
      missing.push("description");
    }
    if self.category.trim().is_empty() {
      missing.push("category");
    }
    if self.image.trim().is_empty() {
      missing.push("image");
    }
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::MissingFields(missing))
    }
  }
}

/// Field edits for an existing post.
///
/// `image: None` keeps the stored image; `Some(url)` replaces it. Subtitle
/// may be cleared by sending an empty string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdate {
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub subtitle:    String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub image:       Option<String>,
}

impl BlogUpdate {
  pub fn validate(&self) -> Result<()> {
    let mut missing = Vec::new();
    if self.title.trim().is_empty() {
      missing.push("title");
    }
    if self.description.trim().is_empty() {
      missing.push("description");
    }
    if self.category.trim().is_empty() {
      missing.push("category");
    }
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::MissingFields(missing))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full() -> NewBlog {
    NewBlog {
      title:        "Rust in Production".into(),
      subtitle:     "Field notes".into(),
      description:  "<p>Body</p>".into(),
      category:     "Technology".into(),
      image:        "https://cdn.example.com/cover.webp".into(),
      is_published: false,
      author_email: None,
    }
  }

  #[test]
  fn valid_new_blog_passes() {
    assert!(full().validate().is_ok());
  }

  #[test]
  fn new_blog_names_every_missing_field() {
    let mut input = full();
    input.title = String::new();
    input.image = "   ".into();

    let Error::MissingFields(fields) = input.validate().unwrap_err();
    assert_eq!(fields, vec!["title", "image"]);
  }

  #[test]
  fn update_allows_empty_subtitle_and_absent_image() {
    let update = BlogUpdate {
      title:       "New title".into(),
      subtitle:    String::new(),
      description: "<p>edited</p>".into(),
      category:    "Technology".into(),
      image:       None,
    };
    assert!(update.validate().is_ok());
  }

  #[test]
  fn update_requires_title_description_category() {
    let update = BlogUpdate {
      title:       String::new(),
      subtitle:    String::new(),
      description: String::new(),
      category:    String::new(),
      image:       None,
    };
    let Error::MissingFields(fields) = update.validate().unwrap_err();
    assert_eq!(fields, vec!["title", "description", "category"]);
  }
}
