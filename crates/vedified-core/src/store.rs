//! The `BlogStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `vedified-store-sqlite`). The HTTP layer depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  blog::{BlogPost, BlogUpdate, NewBlog},
  comment::{Comment, CommentWithBlog, NewComment},
  dashboard::DashboardSummary,
};

/// Abstraction over a Vedified persistence backend.
///
/// Single-document writes rely on the backend's per-row atomicity; the one
/// multi-row operation, [`delete_blog`](BlogStore::delete_blog), must be
/// atomic so no orphaned comments survive a partial failure.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BlogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Blogs ─────────────────────────────────────────────────────────────

  /// Create and persist a new post. Timestamps and the id are assigned by
  /// the store. Callers are expected to have run [`NewBlog::validate`]
  /// first; the store itself accepts drafts in any shape the at-rest model
  /// allows.
  fn create_blog(
    &self,
    input: NewBlog,
  ) -> impl Future<Output = Result<BlogPost, Self::Error>> + Send + '_;

  /// Retrieve a post by id. Returns `None` if not found.
  fn get_blog(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<BlogPost>, Self::Error>> + Send + '_;

  /// All published posts, newest-first by creation time.
  fn list_published(
    &self,
  ) -> impl Future<Output = Result<Vec<BlogPost>, Self::Error>> + Send + '_;

  /// Every post regardless of publish state, newest-first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<BlogPost>, Self::Error>> + Send + '_;

  /// Apply field edits to an existing post. The stored image is replaced
  /// only when `update.image` is `Some`; `updated_at` is bumped.
  fn update_blog(
    &self,
    id: Uuid,
    update: BlogUpdate,
  ) -> impl Future<Output = Result<BlogPost, Self::Error>> + Send + '_;

  /// Flip `is_published` and return the updated post.
  ///
  /// Refuses to publish a post whose image is empty, so the at-rest
  /// invariant (published implies image) actually holds.
  fn toggle_publish(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<BlogPost, Self::Error>> + Send + '_;

  /// Delete a post and every comment referencing it, as one atomic unit.
  fn delete_blog(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Record a public comment submission against `blog_id`.
  ///
  /// The stored comment is always unapproved; only
  /// [`approve_comment`](BlogStore::approve_comment) changes that. Fails if
  /// `blog_id` references no existing post.
  fn add_comment(
    &self,
    blog_id: Uuid,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Approved comments for one post, newest-first.
  fn approved_comments(
    &self,
    blog_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Every comment, annotated with its parent post's title and image,
  /// newest-first. Moderation view — includes unapproved comments.
  fn all_comments(
    &self,
  ) -> impl Future<Output = Result<Vec<CommentWithBlog>, Self::Error>> + Send + '_;

  /// Mark a comment approved and return it. Idempotent: approving an
  /// already-approved comment is a no-op success.
  fn approve_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Delete a comment by id. Irreversible.
  fn delete_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Dashboard ─────────────────────────────────────────────────────────

  /// Aggregate counts and the 5 most recent posts, scoped to
  /// `author_email`. Posts without an author are in nobody's scope.
  fn summarize<'a>(
    &'a self,
    author_email: &'a str,
  ) -> impl Future<Output = Result<DashboardSummary, Self::Error>> + Send + 'a;
}
