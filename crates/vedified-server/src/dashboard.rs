//! Author dashboard handler.

use axum::{Json, extract::State};
use vedified_core::{dashboard::DashboardSummary, store::BlogStore};

use crate::{
  AppState,
  auth::Authenticated,
  envelope::{Envelope, success},
  error::Error,
};

/// Aggregate counts and recent posts for the authenticated author. Always
/// scoped to the caller's own posts, admins included.
pub async fn summarize<S>(
  Authenticated(identity): Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<DashboardSummary>>, Error>
where
  S: BlogStore + Clone + Send + Sync + 'static,
{
  let summary = state
    .store
    .summarize(&identity.email)
    .await
    .map_err(Error::from_store)?;
  Ok(success("Dashboard fetched successfully", summary))
}
