//! Error type for `vedified-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("blog not found: {0}")]
  BlogNotFound(uuid::Uuid),

  #[error("comment not found: {0}")]
  CommentNotFound(uuid::Uuid),

  /// Attempted to publish a draft that has no image.
  #[error("cannot publish blog {0} without an image")]
  DraftMissingImage(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
