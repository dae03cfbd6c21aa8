//! Comment submission and moderation handlers.

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::Value;
use uuid::Uuid;
use vedified_core::{
  comment::{Comment, CommentWithBlog, NewComment},
  store::BlogStore,
};

use crate::{
  AppState,
  auth::AdminOnly,
  envelope::{Envelope, success, success_message},
  error::Error,
};

/// Public submission. The stored comment is always unapproved.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Path(blog_id): Path<Uuid>,
  Json(input): Json<NewComment>,
) -> Result<Json<Envelope<Comment>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  input.validate()?;
  let comment = state
    .store
    .add_comment(blog_id, input)
    .await
    .map_err(Error::from_store)?;

  Ok(success(
    "Comment added successfully. It will be visible after admin approval.",
    comment,
  ))
}

pub async fn list_approved<S>(
  State(state): State<AppState<S>>,
  Path(blog_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Comment>>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let comments = state
    .store
    .approved_comments(blog_id)
    .await
    .map_err(Error::from_store)?;
  Ok(success("Comments fetched successfully", comments))
}

/// Moderation view: every comment, annotated with its parent blog.
pub async fn list_all<S>(
  AdminOnly(_): AdminOnly,
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<CommentWithBlog>>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let comments = state.store.all_comments().await.map_err(Error::from_store)?;
  Ok(success("Comments fetched successfully", comments))
}

pub async fn approve<S>(
  AdminOnly(_): AdminOnly,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Comment>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let comment = state
    .store
    .approve_comment(id)
    .await
    .map_err(Error::from_store)?;
  Ok(success("Comment approved successfully", comment))
}

pub async fn delete<S>(
  AdminOnly(_): AdminOnly,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Value>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  state.store.delete_comment(id).await.map_err(Error::from_store)?;
  tracing::info!(comment_id = %id, "comment deleted");
  Ok(success_message("Comment deleted successfully"))
}
