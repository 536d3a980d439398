//! SQLite persistence for Storyteller tasks.
//!
//! This crate provides the schema, embedded migrations, and a Diesel-backed
//! [`TaskRepository`](storyteller_interface::TaskRepository) implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use storyteller_database::SqliteTaskRepository;
//!
//! let repo = SqliteTaskRepository::open("sqlite://./storyteller.db")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod repository;

/// Diesel table definitions.
pub mod schema;

pub use connection::{MIGRATIONS, establish_connection};
pub use models::{NewStoryRow, StoryRow};
pub use repository::SqliteTaskRepository;
