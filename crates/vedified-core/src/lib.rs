//! Core types and trait definitions for the Vedified blogging platform.
//!
//! Holds the domain model, validation rules, and the [`store::BlogStore`]
//! trait. Deliberately free of HTTP and database dependencies; every other
//! crate in the workspace depends on this one.

pub mod blog;
pub mod comment;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod store;

pub use error::{Error, Result};
