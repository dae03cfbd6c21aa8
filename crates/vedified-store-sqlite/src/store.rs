//! [`SqliteStore`] — the SQLite implementation of [`BlogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use vedified_core::{
  blog::{BlogPost, BlogUpdate, NewBlog},
  comment::{Comment, CommentWithBlog, NewComment},
  dashboard::DashboardSummary,
  store::BlogStore,
};

use crate::{
  Error, Result,
  encode::{RawBlog, RawComment, RawCommentWithBlog, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const BLOG_COLUMNS: &str = "blog_id, title, subtitle, description, category, \
                            image, is_published, author_email, created_at, updated_at";

const COMMENT_COLUMNS: &str =
  "comment_id, blog_id, name, content, is_approved, created_at";

fn raw_blog_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawBlog> {
  Ok(RawBlog {
    blog_id:      row.get(0)?,
    title:        row.get(1)?,
    subtitle:     row.get(2)?,
    description:  row.get(3)?,
    category:     row.get(4)?,
    image:        row.get(5)?,
    is_published: row.get(6)?,
    author_email: row.get(7)?,
    created_at:   row.get(8)?,
    updated_at:   row.get(9)?,
  })
}

fn raw_comment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComment> {
  Ok(RawComment {
    comment_id:  row.get(0)?,
    blog_id:     row.get(1)?,
    name:        row.get(2)?,
    content:     row.get(3)?,
    is_approved: row.get(4)?,
    created_at:  row.get(5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Vedified blog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_blog(&self, id: Uuid) -> Result<Option<BlogPost>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBlog> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE blog_id = ?1"),
              rusqlite::params![id_str],
              raw_blog_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBlog::into_blog).transpose()
  }

  async fn fetch_comment(&self, id: Uuid) -> Result<Option<Comment>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = ?1"),
              rusqlite::params![id_str],
              raw_comment_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }

  async fn list_blogs(&self, published_only: bool) -> Result<Vec<BlogPost>> {
    let raws: Vec<RawBlog> = self
      .conn
      .call(move |conn| {
        let filter = if published_only { "WHERE is_published = 1" } else { "" };
        let mut stmt = conn.prepare(&format!(
          "SELECT {BLOG_COLUMNS} FROM blogs {filter} ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], raw_blog_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBlog::into_blog).collect()
  }
}

// ─── BlogStore impl ──────────────────────────────────────────────────────────

impl BlogStore for SqliteStore {
  type Error = Error;

  // ── Blogs ─────────────────────────────────────────────────────────────────

  async fn create_blog(&self, input: NewBlog) -> Result<BlogPost> {
    let now = Utc::now();
    let post = BlogPost {
      blog_id:      Uuid::new_v4(),
      title:        input.title,
      subtitle:     input.subtitle,
      description:  input.description,
      category:     input.category,
      image:        input.image,
      is_published: input.is_published,
      author_email: input.author_email,
      created_at:   now,
      updated_at:   now,
    };

    let id_str      = encode_uuid(post.blog_id);
    let title       = post.title.clone();
    let subtitle    = post.subtitle.clone();
    let description = post.description.clone();
    let category    = post.category.clone();
    let image       = post.image.clone();
    let published   = post.is_published;
    let author      = post.author_email.clone();
    let created_str = encode_dt(post.created_at);
    let updated_str = encode_dt(post.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO blogs (
             blog_id, title, subtitle, description, category,
             image, is_published, author_email, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            title,
            subtitle,
            description,
            category,
            image,
            published,
            author,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn get_blog(&self, id: Uuid) -> Result<Option<BlogPost>> {
    self.fetch_blog(id).await
  }

  async fn list_published(&self) -> Result<Vec<BlogPost>> {
    self.list_blogs(true).await
  }

  async fn list_all(&self) -> Result<Vec<BlogPost>> {
    self.list_blogs(false).await
  }

  async fn update_blog(&self, id: Uuid, update: BlogUpdate) -> Result<BlogPost> {
    let existing = self.fetch_blog(id).await?.ok_or(Error::BlogNotFound(id))?;

    let image = update.image.unwrap_or_else(|| existing.image.clone());
    let post = BlogPost {
      title: update.title,
      subtitle: update.subtitle,
      description: update.description,
      category: update.category,
      image,
      updated_at: Utc::now(),
      ..existing
    };

    let id_str      = encode_uuid(id);
    let title       = post.title.clone();
    let subtitle    = post.subtitle.clone();
    let description = post.description.clone();
    let category    = post.category.clone();
    let image       = post.image.clone();
    let updated_str = encode_dt(post.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE blogs
           SET title = ?1, subtitle = ?2, description = ?3, category = ?4,
               image = ?5, updated_at = ?6
           WHERE blog_id = ?7",
          rusqlite::params![
            title,
            subtitle,
            description,
            category,
            image,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn toggle_publish(&self, id: Uuid) -> Result<BlogPost> {
    let existing = self.fetch_blog(id).await?.ok_or(Error::BlogNotFound(id))?;

    // Publish implies image; unpublishing is always allowed.
    if !existing.is_published && !existing.can_publish() {
      return Err(Error::DraftMissingImage(id));
    }

    let post = BlogPost {
      is_published: !existing.is_published,
      updated_at: Utc::now(),
      ..existing
    };

    let id_str      = encode_uuid(id);
    let published   = post.is_published;
    let updated_str = encode_dt(post.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE blogs SET is_published = ?1, updated_at = ?2 WHERE blog_id = ?3",
          rusqlite::params![published, updated_str, id_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn delete_blog(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    // Comments first, then the post, in one transaction: a partial failure
    // can never leave orphaned comments behind.
    let deleted: usize = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM comments WHERE blog_id = ?1", rusqlite::params![id_str])?;
        let deleted =
          tx.execute("DELETE FROM blogs WHERE blog_id = ?1", rusqlite::params![id_str])?;
        tx.commit()?;
        Ok(deleted)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::BlogNotFound(id));
    }
    Ok(())
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(&self, blog_id: Uuid, input: NewComment) -> Result<Comment> {
    let comment = Comment {
      comment_id:  Uuid::new_v4(),
      blog_id,
      name:        input.name,
      content:     input.content,
      is_approved: false,
      created_at:  Utc::now(),
    };

    let comment_id_str = encode_uuid(comment.comment_id);
    let blog_id_str    = encode_uuid(blog_id);
    let name           = comment.name.clone();
    let content        = comment.content.clone();
    let created_str    = encode_dt(comment.created_at);

    let blog_exists: bool = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM blogs WHERE blog_id = ?1",
            rusqlite::params![blog_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO comments (comment_id, blog_id, name, content, is_approved, created_at)
           VALUES (?1, ?2, ?3, ?4, 0, ?5)",
          rusqlite::params![comment_id_str, blog_id_str, name, content, created_str],
        )?;
        Ok(true)
      })
      .await?;

    if !blog_exists {
      return Err(Error::BlogNotFound(blog_id));
    }
    Ok(comment)
  }

  async fn approved_comments(&self, blog_id: Uuid) -> Result<Vec<Comment>> {
    let blog_id_str = encode_uuid(blog_id);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM comments
           WHERE blog_id = ?1 AND is_approved = 1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![blog_id_str], raw_comment_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn all_comments(&self) -> Result<Vec<CommentWithBlog>> {
    let raws: Vec<RawCommentWithBlog> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT c.comment_id, c.blog_id, c.name, c.content, c.is_approved,
                  c.created_at, b.title, b.image
           FROM comments c
           LEFT JOIN blogs b ON b.blog_id = c.blog_id
           ORDER BY c.created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCommentWithBlog {
              comment:    raw_comment_from_row(row)?,
              blog_title: row.get(6)?,
              blog_image: row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawCommentWithBlog::into_comment_with_blog)
      .collect()
  }

  async fn approve_comment(&self, id: Uuid) -> Result<Comment> {
    let id_str = encode_uuid(id);

    // Unconditional set-to-approved; re-approving is a no-op success.
    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE comments SET is_approved = 1 WHERE comment_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::CommentNotFound(id));
    }

    self
      .fetch_comment(id)
      .await?
      .ok_or(Error::CommentNotFound(id))
  }

  async fn delete_comment(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM comments WHERE comment_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::CommentNotFound(id));
    }
    Ok(())
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  async fn summarize(&self, author_email: &str) -> Result<DashboardSummary> {
    let author = author_email.to_owned();

    let (total, published, comment_count, recent_raws): (i64, i64, i64, Vec<RawBlog>) =
      self
        .conn
        .call(move |conn| {
          let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM blogs WHERE author_email = ?1",
            rusqlite::params![author],
            |r| r.get(0),
          )?;

          let published: i64 = conn.query_row(
            "SELECT COUNT(*) FROM blogs WHERE author_email = ?1 AND is_published = 1",
            rusqlite::params![author],
            |r| r.get(0),
          )?;

          // Comments on the owned set only, never a global count.
          let comment_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments
             WHERE blog_id IN (SELECT blog_id FROM blogs WHERE author_email = ?1)",
            rusqlite::params![author],
            |r| r.get(0),
          )?;

          let mut stmt = conn.prepare(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs
             WHERE author_email = ?1
             ORDER BY created_at DESC
             LIMIT 5"
          ))?;
          let recent = stmt
            .query_map(rusqlite::params![author], raw_blog_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

          Ok((total, published, comment_count, recent))
        })
        .await?;

    let recent_blogs = recent_raws
      .into_iter()
      .map(RawBlog::into_blog)
      .collect::<Result<Vec<_>>>()?;

    Ok(DashboardSummary {
      total_blogs:     total as u64,
      published_blogs: published as u64,
      draft_blogs:     (total - published) as u64,
      comment_count:   comment_count as u64,
      recent_blogs,
    })
  }
}
