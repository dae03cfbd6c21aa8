//! HTTP layer for Vedified.
//!
//! Exposes an axum [`Router`] backed by any [`vedified_core::store::BlogStore`].
//! Every endpoint answers with the uniform `{success, message, data}` envelope
//! at HTTP 200; see [`envelope`].

pub mod assist;
pub mod auth;
pub mod blogs;
pub mod comments;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod federated;
pub mod login;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Instant};

use axum::{
  Json, Router,
  extract::State,
  routing::{delete, get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use vedified_core::store::BlogStore;

use assist::ContentGenerator;
use auth::{AdminAccount, AuthConfig};
use envelope::{Envelope, success};
use federated::IdentityVerifier;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `VEDIFIED_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  pub jwt_secret:          String,
  #[serde(default = "default_token_ttl")]
  pub token_ttl_hours:     i64,
  #[serde(default)]
  pub admin_accounts:      Vec<AdminAccount>,
  #[serde(default)]
  pub federated_writers:   Vec<String>,
  #[serde(default)]
  pub federated_allow_any: bool,
  /// Enables the Firebase verifier when set.
  #[serde(default)]
  pub firebase_project_id: Option<String>,
  /// Enables the Gemini generator when set.
  #[serde(default)]
  pub gemini_api_key:      Option<String>,
  #[serde(default = "default_gemini_model")]
  pub gemini_model:        String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("vedified.db") }
fn default_token_ttl() -> i64 { 168 }
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }

impl ServerConfig {
  pub fn auth_config(&self) -> AuthConfig {
    AuthConfig {
      jwt_secret:          self.jwt_secret.clone(),
      token_ttl_hours:     self.token_ttl_hours,
      admins:              self.admin_accounts.clone(),
      federated_writers:   self.federated_writers.clone(),
      federated_allow_any: self.federated_allow_any,
    }
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: BlogStore> {
  pub store:     Arc<S>,
  pub auth:      Arc<AuthConfig>,
  pub verifier:  Arc<dyn IdentityVerifier>,
  pub generator: Arc<dyn ContentGenerator>,
  started:       Instant,
}

impl<S: BlogStore> AppState<S> {
  pub fn new(
    store: Arc<S>,
    auth: Arc<AuthConfig>,
    verifier: Arc<dyn IdentityVerifier>,
    generator: Arc<dyn ContentGenerator>,
  ) -> Self {
    AppState { store, auth, verifier, generator, started: Instant::now() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full Vedified API router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BlogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health::<S>))
    // Auth
    .route("/api/admin/login", post(login::password_login::<S>))
    .route("/api/admin/accounts", get(login::admin_accounts::<S>))
    .route("/api/auth/federated-login", post(login::federated_login::<S>))
    // Blogs (static segments before `{id}`)
    .route("/api/blogs", get(blogs::list_published::<S>).post(blogs::create::<S>))
    .route("/api/blogs/all", get(blogs::list_all::<S>))
    .route("/api/blogs/generate", post(blogs::generate::<S>))
    .route(
      "/api/blogs/{id}",
      get(blogs::get_one::<S>)
        .put(blogs::update::<S>)
        .delete(blogs::delete::<S>),
    )
    .route("/api/blogs/{id}/toggle-publish", post(blogs::toggle_publish::<S>))
    // Comments
    .route(
      "/api/blogs/{id}/comments",
      get(comments::list_approved::<S>).post(comments::submit::<S>),
    )
    .route("/api/comments", get(comments::list_all::<S>))
    .route("/api/comments/{id}/approve", post(comments::approve::<S>))
    .route("/api/comments/{id}", delete(comments::delete::<S>))
    // Dashboard
    .route("/api/dashboard", get(dashboard::summarize::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Liveness probe.
async fn health<S>(State(state): State<AppState<S>>) -> Json<Envelope<Value>>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  success(
    "Server is healthy",
    json!({
      "uptime":    state.started.elapsed().as_secs(),
      "timestamp": Utc::now().to_rfc3339(),
    }),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use async_trait::async_trait;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;
  use vedified_core::{
    blog::NewBlog,
    identity::{Identity, Role},
  };
  use vedified_store_sqlite::SqliteStore;

  use crate::federated::VerifiedIdentity;

  // ── Test doubles ────────────────────────────────────────────────────────

  /// Accepts exactly the token `"good-token"` and returns a fixed identity.
  struct StaticVerifier(VerifiedIdentity);

  #[async_trait]
  impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, Error> {
      if id_token == "good-token" {
        Ok(self.0.clone())
      } else {
        Err(Error::InvalidToken)
      }
    }
  }

  struct CannedGenerator(&'static str);

  #[async_trait]
  impl ContentGenerator for CannedGenerator {
    async fn generate(
      &self,
      _title: &str,
      _category: &str,
      _subtitle: Option<&str>,
    ) -> Result<String, Error> {
      Ok(self.0.to_string())
    }
  }

  struct FailingGenerator;

  #[async_trait]
  impl ContentGenerator for FailingGenerator {
    async fn generate(
      &self,
      _title: &str,
      _category: &str,
      _subtitle: Option<&str>,
    ) -> Result<String, Error> {
      Err(Error::Upstream("model unavailable".into()))
    }
  }

  // ── Fixtures ────────────────────────────────────────────────────────────

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"secret", &salt)
      .unwrap()
      .to_string();

    let auth = AuthConfig {
      jwt_secret:          "test-secret".to_string(),
      token_ttl_hours:     1,
      admins:              vec![AdminAccount {
        email:         "admin@example.com".to_string(),
        name:          "Super Admin".to_string(),
        password_hash: hash,
      }],
      federated_writers:   vec!["writer@example.com".to_string()],
      federated_allow_any: false,
    };

    AppState::new(
      Arc::new(store),
      Arc::new(auth),
      Arc::new(federated::DisabledVerifier),
      Arc::new(FailingGenerator),
    )
  }

  fn admin_token(state: &AppState<SqliteStore>) -> String {
    let identity = Identity {
      email: "admin@example.com".to_string(),
      name:  "Super Admin".to_string(),
      role:  Role::Admin,
    };
    auth::issue_token(&state.auth, &identity).unwrap()
  }

  fn writer_token(state: &AppState<SqliteStore>) -> String {
    let identity = Identity {
      email: "writer@example.com".to_string(),
      name:  "Writer".to_string(),
      role:  Role::User,
    };
    auth::issue_token(&state.auth, &identity).unwrap()
  }

  /// Fire one request and parse the envelope. Every endpoint answers 200.
  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> Value {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn full_blog(title: &str) -> Value {
    json!({
      "title":       title,
      "subtitle":    "Field notes",
      "description": "<p>Body</p>",
      "category":    "Technology",
      "image":       "https://cdn.example.com/cover.webp",
      "isPublished": true,
    })
  }

  // ── Health ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_reports_liveness() {
    let state = make_state().await;
    let resp = send(state, "GET", "/health", None, None).await;
    assert_eq!(resp["success"], true);
    assert!(resp["data"]["uptime"].is_u64());
    assert!(resp["data"]["timestamp"].is_string());
  }

  // ── Login ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn password_login_succeeds() {
    let state = make_state().await;
    let body = json!({ "email": "admin@example.com", "password": "secret" });
    let resp = send(state, "POST", "/api/admin/login", None, Some(body)).await;

    assert_eq!(resp["success"], true);
    assert_eq!(resp["message"], "Welcome back, Super Admin!");
    assert!(resp["data"]["token"].is_string());
    assert_eq!(resp["data"]["user"]["role"], "admin");
  }

  #[tokio::test]
  async fn login_failures_share_a_generic_message() {
    let state = make_state().await;

    let wrong_pass = send(
      state.clone(),
      "POST",
      "/api/admin/login",
      None,
      Some(json!({ "email": "admin@example.com", "password": "nope" })),
    )
    .await;
    let unknown = send(
      state,
      "POST",
      "/api/admin/login",
      None,
      Some(json!({ "email": "ghost@example.com", "password": "secret" })),
    )
    .await;

    assert_eq!(wrong_pass["success"], false);
    assert_eq!(wrong_pass["message"], "Invalid credentials");
    assert_eq!(unknown["message"], wrong_pass["message"]);
  }

  #[tokio::test]
  async fn missing_empty_and_garbage_tokens_fail_identically() {
    let state = make_state().await;
    let body = full_blog("Unauthorized");

    let missing =
      send(state.clone(), "POST", "/api/blogs", None, Some(body.clone())).await;
    let empty =
      send(state.clone(), "POST", "/api/blogs", Some(""), Some(body.clone())).await;
    let garbage = send(state, "POST", "/api/blogs", Some("not-a-jwt"), Some(body)).await;

    for resp in [&missing, &empty, &garbage] {
      assert_eq!(resp["success"], false);
      assert_eq!(resp["message"], "Invalid token");
    }
  }

  #[tokio::test]
  async fn admin_roster_omits_password_hashes() {
    let state = make_state().await;
    let admin = admin_token(&state);

    let resp =
      send(state.clone(), "GET", "/api/admin/accounts", Some(admin.as_str()), None).await;
    assert_eq!(resp["success"], true);
    let accounts = resp["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["email"], "admin@example.com");
    assert_eq!(accounts[0]["role"], "admin");
    assert!(accounts[0].get("passwordHash").is_none());
    assert!(!resp.to_string().contains("argon2"));

    let writer = writer_token(&state);
    let denied = send(state, "GET", "/api/admin/accounts", Some(writer.as_str()), None).await;
    assert_eq!(denied["message"], "Admin access required");
  }

  // ── Federated login ─────────────────────────────────────────────────────

  fn verified_writer(email: &str, email_verified: bool) -> VerifiedIdentity {
    VerifiedIdentity {
      email: email.to_string(),
      email_verified,
      name: Some("Writer".to_string()),
    }
  }

  #[tokio::test]
  async fn federated_login_accepts_whitelisted_identity_as_writer() {
    let mut state = make_state().await;
    state.verifier = Arc::new(StaticVerifier(verified_writer("writer@example.com", true)));

    let resp = send(
      state,
      "POST",
      "/api/auth/federated-login",
      None,
      Some(json!({ "idToken": "good-token" })),
    )
    .await;

    assert_eq!(resp["success"], true);
    assert_eq!(resp["data"]["user"]["role"], "user");
    assert_eq!(resp["data"]["user"]["email"], "writer@example.com");
  }

  #[tokio::test]
  async fn federated_login_rejections_are_generic() {
    let mut state = make_state().await;
    state.verifier = Arc::new(StaticVerifier(verified_writer("writer@example.com", true)));

    // Bad provider token, unverified email, and non-whitelisted email all
    // collapse into the same message.
    let bad_token = send(
      state.clone(),
      "POST",
      "/api/auth/federated-login",
      None,
      Some(json!({ "idToken": "forged" })),
    )
    .await;
    assert_eq!(bad_token["message"], "Invalid credentials");

    let mut unverified = make_state().await;
    unverified.verifier =
      Arc::new(StaticVerifier(verified_writer("writer@example.com", false)));
    let resp = send(
      unverified,
      "POST",
      "/api/auth/federated-login",
      None,
      Some(json!({ "idToken": "good-token" })),
    )
    .await;
    assert_eq!(resp["message"], "Invalid credentials");

    let mut stranger = make_state().await;
    stranger.verifier =
      Arc::new(StaticVerifier(verified_writer("stranger@example.com", true)));
    let resp = send(
      stranger,
      "POST",
      "/api/auth/federated-login",
      None,
      Some(json!({ "idToken": "good-token" })),
    )
    .await;
    assert_eq!(resp["message"], "Invalid credentials");
  }

  #[tokio::test]
  async fn federated_allow_any_admits_unlisted_identities() {
    let mut state = make_state().await;
    state.verifier =
      Arc::new(StaticVerifier(verified_writer("stranger@example.com", true)));
    let mut auth = (*state.auth).clone();
    auth.federated_allow_any = true;
    state.auth = Arc::new(auth);

    let resp = send(
      state,
      "POST",
      "/api/auth/federated-login",
      None,
      Some(json!({ "idToken": "good-token" })),
    )
    .await;
    assert_eq!(resp["success"], true);
    assert_eq!(resp["data"]["user"]["role"], "user");
  }

  // ── Blog CRUD ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_fetch_roundtrip() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Rust in Production")),
    )
    .await;
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Blog created successfully");
    assert_eq!(created["data"]["authorEmail"], "admin@example.com");
    let id = created["data"]["blogId"].as_str().unwrap().to_string();

    let fetched = send(state, "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["data"], created["data"]);
  }

  #[tokio::test]
  async fn create_names_every_missing_field() {
    let state = make_state().await;
    let token = admin_token(&state);

    let resp = send(
      state,
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(json!({ "title": "Only a title" })),
    )
    .await;
    assert_eq!(resp["success"], false);
    assert_eq!(
      resp["message"],
      "missing required fields: subtitle, description, category, image"
    );
  }

  #[tokio::test]
  async fn fetching_unknown_blog_fails() {
    let state = make_state().await;
    let resp =
      send(state, "GET", &format!("/api/blogs/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], "Blog not found");
  }

  #[tokio::test]
  async fn public_list_hides_drafts() {
    let state = make_state().await;
    let token = admin_token(&state);

    send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Published")),
    )
    .await;
    let mut draft = full_blog("Draft");
    draft["isPublished"] = json!(false);
    send(state.clone(), "POST", "/api/blogs", Some(token.as_str()), Some(draft)).await;

    let public = send(state.clone(), "GET", "/api/blogs", None, None).await;
    assert_eq!(public["data"].as_array().unwrap().len(), 1);
    assert_eq!(public["data"][0]["title"], "Published");

    let all = send(state.clone(), "GET", "/api/blogs/all", Some(token.as_str()), None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    // Writers are not admins; the full list stays closed to them.
    let writer = writer_token(&state);
    let denied = send(state, "GET", "/api/blogs/all", Some(writer.as_str()), None).await;
    assert_eq!(denied["success"], false);
    assert_eq!(denied["message"], "Admin access required");
  }

  #[tokio::test]
  async fn sequential_updates_last_write_wins() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Original")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();

    for title in ["First edit", "Second edit"] {
      let update = json!({
        "title":       title,
        "subtitle":    "Edited",
        "description": "<p>edited</p>",
        "category":    "Technology",
      });
      let resp = send(
        state.clone(),
        "PUT",
        &format!("/api/blogs/{id}"),
        Some(token.as_str()),
        Some(update),
      )
      .await;
      assert_eq!(resp["success"], true);
    }

    let fetched = send(state, "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(fetched["data"]["title"], "Second edit");
    // Updates without an image keep the stored one.
    assert_eq!(fetched["data"]["image"], "https://cdn.example.com/cover.webp");
  }

  #[tokio::test]
  async fn toggle_flips_publish_state() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Toggle me")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();

    let resp = send(
      state.clone(),
      "POST",
      &format!("/api/blogs/{id}/toggle-publish"),
      Some(token.as_str()),
      None,
    )
    .await;
    assert_eq!(resp["message"], "Blog unpublished successfully");
    assert_eq!(resp["data"]["isPublished"], false);

    let resp = send(
      state,
      "POST",
      &format!("/api/blogs/{id}/toggle-publish"),
      Some(token.as_str()),
      None,
    )
    .await;
    assert_eq!(resp["message"], "Blog published successfully");
    assert_eq!(resp["data"]["isPublished"], true);
  }

  #[tokio::test]
  async fn toggle_refuses_publishing_imageless_draft() {
    let state = make_state().await;
    let token = admin_token(&state);

    // Bypass on-ingest validation; legacy rows can be imageless drafts.
    let draft = state
      .store
      .create_blog(NewBlog {
        title:        "Imageless".to_string(),
        subtitle:     "Draft".to_string(),
        description:  "<p>Body</p>".to_string(),
        category:     "Technology".to_string(),
        image:        String::new(),
        is_published: false,
        author_email: None,
      })
      .await
      .unwrap();

    let resp = send(
      state,
      "POST",
      &format!("/api/blogs/{}/toggle-publish", draft.blog_id),
      Some(token.as_str()),
      None,
    )
    .await;
    assert_eq!(resp["success"], false);
    assert!(
      resp["message"].as_str().unwrap().contains("without an image"),
      "message: {}",
      resp["message"]
    );
  }

  // ── Comment moderation ──────────────────────────────────────────────────

  #[tokio::test]
  async fn comment_moderation_flow() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Commented")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();

    let submitted = send(
      state.clone(),
      "POST",
      &format!("/api/blogs/{id}/comments"),
      None,
      Some(json!({ "name": "Ana", "content": "Nice post" })),
    )
    .await;
    assert_eq!(submitted["success"], true);
    assert_eq!(submitted["data"]["isApproved"], false);
    let comment_id = submitted["data"]["commentId"].as_str().unwrap().to_string();

    // Not visible publicly before approval.
    let public =
      send(state.clone(), "GET", &format!("/api/blogs/{id}/comments"), None, None)
        .await;
    assert_eq!(public["data"].as_array().unwrap().len(), 0);

    // Visible in the moderation view, annotated with its parent.
    let moderation =
      send(state.clone(), "GET", "/api/comments", Some(token.as_str()), None).await;
    assert_eq!(moderation["data"].as_array().unwrap().len(), 1);
    assert_eq!(moderation["data"][0]["blogTitle"], "Commented");
    assert_eq!(moderation["data"][0]["isApproved"], false);

    let approved = send(
      state.clone(),
      "POST",
      &format!("/api/comments/{comment_id}/approve"),
      Some(token.as_str()),
      None,
    )
    .await;
    assert_eq!(approved["data"]["isApproved"], true);

    let public =
      send(state, "GET", &format!("/api/blogs/{id}/comments"), None, None).await;
    assert_eq!(public["data"].as_array().unwrap().len(), 1);
    assert_eq!(public["data"][0]["name"], "Ana");
  }

  #[tokio::test]
  async fn approving_twice_is_a_noop() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Idempotent")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();
    let submitted = send(
      state.clone(),
      "POST",
      &format!("/api/blogs/{id}/comments"),
      None,
      Some(json!({ "name": "Ana", "content": "Again" })),
    )
    .await;
    let comment_id = submitted["data"]["commentId"].as_str().unwrap().to_string();

    for _ in 0..2 {
      let resp = send(
        state.clone(),
        "POST",
        &format!("/api/comments/{comment_id}/approve"),
        Some(token.as_str()),
        None,
      )
      .await;
      assert_eq!(resp["success"], true);
      assert_eq!(resp["data"]["isApproved"], true);
    }
  }

  #[tokio::test]
  async fn comment_on_unknown_blog_is_rejected() {
    let state = make_state().await;
    let resp = send(
      state,
      "POST",
      &format!("/api/blogs/{}/comments", Uuid::new_v4()),
      None,
      Some(json!({ "name": "Ana", "content": "Into the void" })),
    )
    .await;
    assert_eq!(resp["success"], false);
  }

  #[tokio::test]
  async fn comment_requires_name_and_content() {
    let state = make_state().await;
    let token = admin_token(&state);
    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Strict")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();

    let resp = send(
      state,
      "POST",
      &format!("/api/blogs/{id}/comments"),
      None,
      Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], "missing required fields: name, content");
  }

  #[tokio::test]
  async fn deleting_a_blog_removes_its_comments() {
    let state = make_state().await;
    let token = admin_token(&state);

    let created = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(token.as_str()),
      Some(full_blog("Doomed")),
    )
    .await;
    let id = created["data"]["blogId"].as_str().unwrap().to_string();
    send(
      state.clone(),
      "POST",
      &format!("/api/blogs/{id}/comments"),
      None,
      Some(json!({ "name": "Ana", "content": "Soon gone" })),
    )
    .await;

    let deleted = send(
      state.clone(),
      "DELETE",
      &format!("/api/blogs/{id}"),
      Some(token.as_str()),
      None,
    )
    .await;
    assert_eq!(deleted["message"], "Blog deleted successfully");

    let fetched =
      send(state.clone(), "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(fetched["message"], "Blog not found");

    let moderation = send(state, "GET", "/api/comments", Some(token.as_str()), None).await;
    assert_eq!(moderation["data"].as_array().unwrap().len(), 0);
  }

  // ── Dashboard ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_is_scoped_to_the_caller() {
    let state = make_state().await;
    let admin = admin_token(&state);
    let writer = writer_token(&state);

    let published = send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(admin.as_str()),
      Some(full_blog("Admin published")),
    )
    .await;
    let admin_blog = published["data"]["blogId"].as_str().unwrap().to_string();
    let mut draft = full_blog("Admin draft");
    draft["isPublished"] = json!(false);
    send(state.clone(), "POST", "/api/blogs", Some(admin.as_str()), Some(draft)).await;
    send(
      state.clone(),
      "POST",
      "/api/blogs",
      Some(writer.as_str()),
      Some(full_blog("Writer post")),
    )
    .await;
    send(
      state.clone(),
      "POST",
      &format!("/api/blogs/{admin_blog}/comments"),
      None,
      Some(json!({ "name": "Ana", "content": "On the admin post" })),
    )
    .await;

    let admin_dash =
      send(state.clone(), "GET", "/api/dashboard", Some(admin.as_str()), None).await;
    assert_eq!(admin_dash["data"]["totalBlogs"], 2);
    assert_eq!(admin_dash["data"]["publishedBlogs"], 1);
    assert_eq!(admin_dash["data"]["draftBlogs"], 1);
    assert_eq!(admin_dash["data"]["commentCount"], 1);
    assert_eq!(admin_dash["data"]["recentBlogs"].as_array().unwrap().len(), 2);

    let writer_dash = send(state, "GET", "/api/dashboard", Some(writer.as_str()), None).await;
    assert_eq!(writer_dash["data"]["totalBlogs"], 1);
    assert_eq!(writer_dash["data"]["commentCount"], 0);
    assert_eq!(writer_dash["data"]["recentBlogs"][0]["title"], "Writer post");
  }

  // ── AI assist ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn generate_falls_back_when_generation_fails() {
    // make_state wires the failing generator.
    let state = make_state().await;
    let token = writer_token(&state);

    let resp = send(
      state,
      "POST",
      "/api/blogs/generate",
      Some(token.as_str()),
      Some(json!({ "title": "Sourdough Basics", "category": "Food" })),
    )
    .await;
    assert_eq!(resp["success"], true);
    let content = resp["data"]["content"].as_str().unwrap();
    assert!(content.starts_with("<h2>Introduction</h2>"));
    assert!(content.contains("Sourdough Basics"));
  }

  #[tokio::test]
  async fn generate_uses_generator_output_when_available() {
    let mut state = make_state().await;
    state.generator = Arc::new(CannedGenerator("<h2>Canned</h2><p>Draft</p>"));
    let token = writer_token(&state);

    let resp = send(
      state,
      "POST",
      "/api/blogs/generate",
      Some(token.as_str()),
      Some(json!({ "title": "T", "category": "Tech", "subtitle": "S" })),
    )
    .await;
    assert_eq!(resp["data"]["content"], "<h2>Canned</h2><p>Draft</p>");
  }

  #[tokio::test]
  async fn generate_requires_title_and_category() {
    let state = make_state().await;
    let token = writer_token(&state);

    let resp = send(
      state,
      "POST",
      "/api/blogs/generate",
      Some(token.as_str()),
      Some(json!({ "subtitle": "only" })),
    )
    .await;
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], "missing required fields: title, category");
  }
}
