//! Identity — the decoded session claim attached to authenticated requests.

use serde::{Deserialize, Serialize};

/// Role carried in a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  User,
}

/// The identity/role payload embedded in a session token.
///
/// Never persisted; it exists only between token verification and the end
/// of the request that presented the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  pub email: String,
  pub name:  String,
  pub role:  Role,
}

impl Identity {
  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}
