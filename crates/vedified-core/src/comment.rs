//! Comment — reader feedback gated behind admin approval.
//!
//! Comments are created unapproved, always. The only state transition is an
//! explicit approval; there is no reject/unapprove.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub comment_id:  Uuid,
  /// Non-owning reference to the parent post. Deleting a comment never
  /// affects the post; deleting the post cascades to its comments.
  pub blog_id:     Uuid,
  pub name:        String,
  pub content:     String,
  pub is_approved: bool,
  pub created_at:  DateTime<Utc>,
}

/// A public comment submission. There is deliberately no approval field
/// here: clients cannot submit pre-approved comments.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub content: String,
}

impl NewComment {
  pub fn validate(&self) -> Result<()> {
    let mut missing = Vec::new();
    if self.name.trim().is_empty() {
      missing.push("name");
    }
    if self.content.trim().is_empty() {
      missing.push("content");
    }
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::MissingFields(missing))
    }
  }
}

/// A comment annotated with its parent post's title and image, for the
/// admin moderation view. The blog fields are `None` when the parent row
/// no longer exists (legacy orphans).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithBlog {
  #[serde(flatten)]
  pub comment:    Comment,
  pub blog_title: Option<String>,
  pub blog_image: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn submission_requires_name_and_content() {
    let input = NewComment { name: " ".into(), content: String::new() };
    let Error::MissingFields(fields) = input.validate().unwrap_err();
    assert_eq!(fields, vec!["name", "content"]);
  }

  #[test]
  fn valid_submission_passes() {
    let input = NewComment { name: "Ana".into(), content: "Nice post".into() };
    assert!(input.validate().is_ok());
  }
}
