//! Login handlers — password and federated — plus the admin account list.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use vedified_core::{identity::Identity, store::BlogStore};

use crate::{
  AppState, auth,
  auth::AdminOnly,
  envelope::{Envelope, success},
  error::Error,
};

#[derive(Debug, Deserialize)]
pub struct PasswordLogin {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FederatedLogin {
  #[serde(default, alias = "idToken")]
  pub id_token: String,
}

fn session_payload(token: String, identity: &Identity) -> Value {
  json!({
    "token": token,
    "user": {
      "name":  identity.name,
      "email": identity.email,
      "role":  identity.role,
    },
  })
}

pub async fn password_login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PasswordLogin>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let identity = auth::login_with_password(&state.auth, &body.email, &body.password)?;
  let token = auth::issue_token(&state.auth, &identity)?;

  tracing::info!(email = %identity.email, "admin login");
  Ok(success(
    format!("Welcome back, {}!", identity.name),
    session_payload(token, &identity),
  ))
}

pub async fn federated_login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<FederatedLogin>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  if body.id_token.trim().is_empty() {
    return Err(Error::InvalidCredentials);
  }

  // Verification failures collapse into the same generic error; the reason
  // goes to the log, never the client.
  let verified = state.verifier.verify(&body.id_token).await.map_err(|err| {
    tracing::warn!(%err, "federated token verification failed");
    Error::InvalidCredentials
  })?;

  let identity = auth::authorize_federated(&state.auth, &verified)?;
  let token = auth::issue_token(&state.auth, &identity)?;

  tracing::info!(email = %identity.email, "federated login");
  Ok(success(
    format!("Welcome back, {}!", identity.name),
    session_payload(token, &identity),
  ))
}

/// The configured admin roster. Password hashes never leave the server.
pub async fn admin_accounts<S>(
  AdminOnly(_): AdminOnly,
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let accounts: Vec<Value> = state
    .auth
    .admins
    .iter()
    .map(|a| json!({ "email": a.email, "name": a.name, "role": "admin" }))
    .collect();

  Ok(success("Admin accounts fetched successfully", json!(accounts)))
}
