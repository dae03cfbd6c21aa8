//! The uniform `{success, message, data}` response envelope.
//!
//! Clients read `success` in the body, not the HTTP status line: logical
//! failures are served as HTTP 200 with `success: false`, and `data` is
//! omitted when there is nothing to return.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
}

/// A successful envelope carrying `data`.
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Json<Envelope<T>> {
  Json(Envelope { success: true, message: message.into(), data: Some(data) })
}

/// A successful envelope with no payload.
pub fn success_message(message: impl Into<String>) -> Json<Envelope<serde_json::Value>> {
  Json(Envelope { success: true, message: message.into(), data: None })
}

/// A failed envelope. Only [`crate::error::Error`] should normally build
/// these; exposed for handlers with bespoke failure shapes.
pub fn failure(message: impl Into<String>) -> Json<Envelope<serde_json::Value>> {
  Json(Envelope { success: false, message: message.into(), data: None })
}
