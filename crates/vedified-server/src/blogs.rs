//! Blog CRUD handlers and the AI drafting assist.

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;
use vedified_core::{
  blog::{BlogPost, BlogUpdate, NewBlog},
  store::BlogStore,
};

use crate::{
  AppState,
  assist::fallback_content,
  auth::{AdminOnly, Authenticated},
  envelope::{Envelope, success, success_message},
  error::Error,
};

pub async fn list_published<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<BlogPost>>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let blogs = state.store.list_published().await.map_err(Error::from_store)?;
  Ok(success("Blogs fetched successfully", blogs))
}

pub async fn list_all<S>(
  AdminOnly(_): AdminOnly,
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<BlogPost>>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let blogs = state.store.list_all().await.map_err(Error::from_store)?;
  Ok(success("Blogs fetched successfully", blogs))
}

pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<BlogPost>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let blog = state
    .store
    .get_blog(id)
    .await
    .map_err(Error::from_store)?
    .ok_or(Error::BlogNotFound)?;
  Ok(success("Blog fetched successfully", blog))
}

pub async fn create<S>(
  Authenticated(identity): Authenticated,
  State(state): State<AppState<S>>,
  Json(mut input): Json<NewBlog>,
) -> Result<Json<Envelope<BlogPost>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  input.validate()?;
  input.author_email = Some(identity.email);

  let blog = state.store.create_blog(input).await.map_err(Error::from_store)?;
  tracing::info!(blog_id = %blog.blog_id, "blog created");
  Ok(success("Blog created successfully", blog))
}

pub async fn update<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(update): Json<BlogUpdate>,
) -> Result<Json<Envelope<BlogPost>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  update.validate()?;
  let blog = state
    .store
    .update_blog(id, update)
    .await
    .map_err(Error::from_store)?;
  Ok(success("Blog updated successfully", blog))
}

pub async fn toggle_publish<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<BlogPost>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let blog = state
    .store
    .toggle_publish(id)
    .await
    .map_err(Error::from_store)?;

  let message = if blog.is_published {
    "Blog published successfully"
  } else {
    "Blog unpublished successfully"
  };
  Ok(success(message, blog))
}

pub async fn delete<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  state.store.delete_blog(id).await.map_err(Error::from_store)?;
  tracing::info!(blog_id = %id, "blog deleted");
  Ok(success_message("Blog deleted successfully"))
}

// ─── AI assist ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
  #[serde(default)]
  pub title:    String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub subtitle: String,
}

/// Draft content for a post. Generation failures are downgraded to the
/// deterministic fallback, so this handler only fails on bad input.
pub async fn generate<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<GenerateRequest>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let mut missing = Vec::new();
  if body.title.trim().is_empty() {
    missing.push("title");
  }
  if body.category.trim().is_empty() {
    missing.push("category");
  }
  if !missing.is_empty() {
    return Err(vedified_core::Error::MissingFields(missing).into());
  }

  let subtitle = match body.subtitle.trim() {
    "" => None,
    s => Some(s),
  };

  let content = match state
    .generator
    .generate(&body.title, &body.category, subtitle)
    .await
  {
    Ok(content) => content,
    Err(err) => {
      tracing::warn!(%err, "content generation failed, using fallback");
      fallback_content(&body.title, &body.category)
    }
  };

  Ok(success("Content generated successfully", json!({ "content": content })))
}
