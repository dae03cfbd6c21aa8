//! Error types for `vedified-core`.

use thiserror::Error;

/// Validation failures raised by the domain types themselves. Storage and
/// transport failures live in the backend and server crates.
#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
