//! SQL schema for the Vedified SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS blogs (
    blog_id      TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    subtitle     TEXT NOT NULL DEFAULT '',
    description  TEXT NOT NULL DEFAULT '',   -- HTML body
    category     TEXT NOT NULL DEFAULT '',
    image        TEXT NOT NULL DEFAULT '',   -- CDN URL; may be empty on drafts
    is_published INTEGER NOT NULL DEFAULT 0,
    author_email TEXT,                       -- NULL on legacy rows
    created_at   TEXT NOT NULL,              -- RFC 3339 UTC; server-assigned
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id  TEXT PRIMARY KEY,
    blog_id     TEXT NOT NULL REFERENCES blogs(blog_id),
    name        TEXT NOT NULL,
    content     TEXT NOT NULL,
    is_approved INTEGER NOT NULL DEFAULT 0,  -- one-way transition to 1
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS blogs_created_idx     ON blogs(created_at);
CREATE INDEX IF NOT EXISTS blogs_author_idx      ON blogs(author_email);
CREATE INDEX IF NOT EXISTS comments_blog_idx     ON comments(blog_id);
CREATE INDEX IF NOT EXISTS comments_approved_idx ON comments(is_approved);

PRAGMA user_version = 1;
";
