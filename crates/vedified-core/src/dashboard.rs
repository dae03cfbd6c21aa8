//! Author-scoped dashboard aggregates.

use serde::Serialize;

use crate::blog::BlogPost;

/// Derived counts for one author's dashboard.
///
/// Every figure is scoped to the requesting identity's email: blog counts
/// cover only posts the author owns, and `comment_count` counts comments on
/// that owned set, never a global total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub total_blogs:     u64,
  pub published_blogs: u64,
  pub draft_blogs:     u64,
  pub comment_count:   u64,
  /// The 5 most recently created posts in scope, newest-first.
  pub recent_blogs:    Vec<BlogPost>,
}
