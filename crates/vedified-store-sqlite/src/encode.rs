//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision) so lexicographic `ORDER BY` matches chronological order.
//! UUIDs are stored as hyphenated lowercase strings. Booleans are INTEGER
//! 0/1 and handled natively by rusqlite.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use vedified_core::{
  blog::BlogPost,
  comment::{Comment, CommentWithBlog},
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from a `blogs` row.
pub struct RawBlog {
  pub blog_id:      String,
  pub title:        String,
  pub subtitle:     String,
  pub description:  String,
  pub category:     String,
  pub image:        String,
  pub is_published: bool,
  pub author_email: Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawBlog {
  pub fn into_blog(self) -> Result<BlogPost> {
    Ok(BlogPost {
      blog_id:      decode_uuid(&self.blog_id)?,
      title:        self.title,
      subtitle:     self.subtitle,
      description:  self.description,
      category:     self.category,
      image:        self.image,
      is_published: self.is_published,
      author_email: self.author_email,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw column values read directly from a `comments` row.
pub struct RawComment {
  pub comment_id:  String,
  pub blog_id:     String,
  pub name:        String,
  pub content:     String,
  pub is_approved: bool,
  pub created_at:  String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id:  decode_uuid(&self.comment_id)?,
      blog_id:     decode_uuid(&self.blog_id)?,
      name:        self.name,
      content:     self.content,
      is_approved: self.is_approved,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// A `comments` row joined with its parent `blogs` row, for the admin
/// moderation view. Blog columns are NULL when the parent is gone.
pub struct RawCommentWithBlog {
  pub comment:    RawComment,
  pub blog_title: Option<String>,
  pub blog_image: Option<String>,
}

impl RawCommentWithBlog {
  pub fn into_comment_with_blog(self) -> Result<CommentWithBlog> {
    Ok(CommentWithBlog {
      comment:    self.comment.into_comment()?,
      blog_title: self.blog_title,
      blog_image: self.blog_image,
    })
  }
}
