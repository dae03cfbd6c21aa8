//! Server error type rendered as the uniform response envelope.
//!
//! Authentication failures are deliberately generic: the message never says
//! which part of a credential pair was wrong, or why a token was rejected.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("Invalid token")]
  InvalidToken,

  #[error("Admin access required")]
  Forbidden,

  /// Validation failure; the message names the missing field(s).
  #[error("{0}")]
  Validation(String),

  #[error("Blog not found")]
  BlogNotFound,

  #[error("Comment not found")]
  CommentNotFound,

  /// A collaborator (federated verifier, AI endpoint) failed.
  #[error("{0}")]
  Upstream(String),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a generic [`BlogStore`] implementation.
  ///
  /// [`BlogStore`]: vedified_core::store::BlogStore
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }
}

impl From<vedified_core::Error> for Error {
  fn from(err: vedified_core::Error) -> Self {
    Error::Validation(err.to_string())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    // HTTP 200 with `success: false` — failure lives in the body envelope.
    let body = json!({ "success": false, "message": self.to_string() });
    (StatusCode::OK, Json(body)).into_response()
  }
}
