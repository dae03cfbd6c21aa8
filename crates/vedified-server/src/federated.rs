//! Federated identity verification.
//!
//! The server never mints federated identities itself; it checks a token
//! issued by an external provider (Firebase) and hands the verified claims
//! to the authorization policy in [`crate::auth`]. The trait boundary keeps
//! the network dependency out of handler tests.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::Error;

/// Claims we trust from a provider-issued token after verification.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
  pub email:          String,
  pub email_verified: bool,
  pub name:           Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
  /// Verify a provider-issued ID token and extract its identity claims.
  async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, Error>;
}

// ─── Firebase ────────────────────────────────────────────────────────────────

const FIREBASE_JWK_URL: &str =
  "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Deserialize)]
struct JwkSet {
  keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
  kid: String,
  n:   String,
  e:   String,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
  email:          String,
  #[serde(default)]
  email_verified: bool,
  name:           Option<String>,
}

/// Verifies Firebase ID tokens against Google's published signing keys.
///
/// Keys are fetched per verification; Google serves them with long cache
/// headers but login volume here does not justify a cache layer.
pub struct FirebaseVerifier {
  client:     reqwest::Client,
  project_id: String,
}

impl FirebaseVerifier {
  pub fn new(project_id: impl Into<String>) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(10))
      .build()
      .map_err(|e| Error::Upstream(format!("failed to build http client: {e}")))?;
    Ok(FirebaseVerifier { client, project_id: project_id.into() })
  }

  async fn fetch_keys(&self) -> Result<JwkSet, Error> {
    let resp = self
      .client
      .get(FIREBASE_JWK_URL)
      .send()
      .await
      .map_err(|e| Error::Upstream(format!("failed to fetch signing keys: {e}")))?;
    resp
      .json::<JwkSet>()
      .await
      .map_err(|e| Error::Upstream(format!("malformed signing key response: {e}")))
  }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
  async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, Error> {
    let header =
      jsonwebtoken::decode_header(id_token).map_err(|_| Error::InvalidToken)?;
    let kid = header.kid.ok_or(Error::InvalidToken)?;

    let keys = self.fetch_keys().await?;
    let jwk = keys
      .keys
      .iter()
      .find(|k| k.kid == kid)
      .ok_or(Error::InvalidToken)?;
    let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
      .map_err(|_| Error::InvalidToken)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&self.project_id]);
    validation
      .set_issuer(&[format!("https://securetoken.google.com/{}", self.project_id)]);

    let data = jsonwebtoken::decode::<FirebaseClaims>(id_token, &key, &validation)
      .map_err(|_| Error::InvalidToken)?;

    Ok(VerifiedIdentity {
      email:          data.claims.email,
      email_verified: data.claims.email_verified,
      name:           data.claims.name,
    })
  }
}

// ─── Disabled ────────────────────────────────────────────────────────────────

/// Stand-in when no provider is configured; rejects every token.
pub struct DisabledVerifier;

#[async_trait]
impl IdentityVerifier for DisabledVerifier {
  async fn verify(&self, _id_token: &str) -> Result<VerifiedIdentity, Error> {
    Err(Error::Upstream("federated login is not configured".into()))
  }
}
