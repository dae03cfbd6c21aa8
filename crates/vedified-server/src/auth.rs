//! Credential validation, session-token issuance, and the authorization
//! guard extractors.
//!
//! Sessions are HS256 JWTs carrying `{sub, name, role, iat, exp}`. Tokens
//! always expire (`token_ttl_hours`); there is no server-side revocation
//! list, so the TTL bounds the exposure window of a leaked token.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use vedified_core::{
  identity::{Identity, Role},
  store::BlogStore,
};

use crate::{AppState, error::Error, federated::VerifiedIdentity};

// ─── Configuration ───────────────────────────────────────────────────────────

/// One configured admin account. `password_hash` is an argon2 PHC string
/// (`$argon2id$v=19$…`); plaintext passwords are never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminAccount {
  pub email:         String,
  pub name:          String,
  pub password_hash: String,
}

/// Credentials and policy accepted as valid for this server instance.
/// Injected at construction; never mutated at request time.
#[derive(Clone)]
pub struct AuthConfig {
  /// Secret for HS256 session tokens, held only by the server process.
  pub jwt_secret:          String,
  pub token_ttl_hours:     i64,
  pub admins:              Vec<AdminAccount>,
  /// Federated emails allowed to obtain a writer token.
  pub federated_writers:   Vec<String>,
  /// Escape hatch: accept any verified federated identity as a writer.
  pub federated_allow_any: bool,
}

// ─── Claims ──────────────────────────────────────────────────────────────────

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  /// Standard JWT subject — the account email.
  sub:  String,
  name: String,
  role: Role,
  iat:  i64,
  exp:  i64,
}

// ─── Credential & token issuer ───────────────────────────────────────────────

/// Validate an email/password pair against the configured admin list.
///
/// Fails closed with the same generic error for an unknown email, a wrong
/// password, and a malformed stored hash.
pub fn login_with_password(
  config: &AuthConfig,
  email: &str,
  password: &str,
) -> Result<Identity, Error> {
  let account = config
    .admins
    .iter()
    .find(|a| a.email == email)
    .ok_or(Error::InvalidCredentials)?;

  let parsed_hash = PasswordHash::new(&account.password_hash)
    .map_err(|_| Error::InvalidCredentials)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::InvalidCredentials)?;

  Ok(Identity {
    email: account.email.clone(),
    name:  account.name.clone(),
    role:  Role::Admin,
  })
}

/// Apply the federated authorization policy to a verified identity.
///
/// Whitelist by default; `federated_allow_any` is the explicit escape
/// hatch. Federated identities are always writers (`Role::User`), never
/// admins.
pub fn authorize_federated(
  config: &AuthConfig,
  verified: &VerifiedIdentity,
) -> Result<Identity, Error> {
  if !verified.email_verified {
    return Err(Error::InvalidCredentials);
  }

  let allowed = config.federated_allow_any
    || config.federated_writers.iter().any(|e| e == &verified.email);
  if !allowed {
    return Err(Error::InvalidCredentials);
  }

  let name = verified.name.clone().unwrap_or_else(|| {
    verified
      .email
      .split('@')
      .next()
      .unwrap_or("Writer")
      .to_string()
  });

  Ok(Identity { email: verified.email.clone(), name, role: Role::User })
}

/// Produce a signed session token for `identity`.
pub fn issue_token(config: &AuthConfig, identity: &Identity) -> Result<String, Error> {
  let now = Utc::now();
  let claims = Claims {
    sub:  identity.email.clone(),
    name: identity.name.clone(),
    role: identity.role,
    iat:  now.timestamp(),
    exp:  (now + Duration::hours(config.token_ttl_hours)).timestamp(),
  };

  jsonwebtoken::encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
  )
  .map_err(|_| Error::InvalidToken)
}

/// Verify a bare token's signature and expiry and decode the claims.
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Identity, Error> {
  let data = jsonwebtoken::decode::<Claims>(
    token,
    &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
    &Validation::new(Algorithm::HS256),
  )
  .map_err(|_| Error::InvalidToken)?;

  Ok(Identity {
    email: data.claims.sub,
    name:  data.claims.name,
    role:  data.claims.role,
  })
}

// ─── Authorization guard ─────────────────────────────────────────────────────

/// Extract and verify the session token from request headers.
///
/// Accepts `Authorization: Bearer <token>` or a bare token. Every failure
/// mode — missing header, empty value, tampered or expired token — yields
/// the same generic error.
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<Identity, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::InvalidToken)?;

  let token = header_val.strip_prefix("Bearer ").unwrap_or(header_val);
  if token.is_empty() {
    return Err(Error::InvalidToken);
  }

  verify_token(config, token)
}

/// Present in a handler's arguments means the request carried a valid
/// session token; carries the decoded identity.
pub struct Authenticated(pub Identity);

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: BlogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    authenticate(&parts.headers, &state.auth).map(Authenticated)
  }
}

/// Like [`Authenticated`], but additionally requires the admin role.
pub struct AdminOnly(pub Identity);

impl<S> FromRequestParts<AppState<S>> for AdminOnly
where
  S: BlogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let identity = authenticate(&parts.headers, &state.auth)?;
    if !identity.is_admin() {
      return Err(Error::Forbidden);
    }
    Ok(AdminOnly(identity))
  }
}
