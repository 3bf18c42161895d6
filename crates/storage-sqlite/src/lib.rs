//! SQLite storage implementation for nestegg.
//!
//! This crate provides all database-related functionality using Diesel with
//! SQLite. It implements the repository traits defined in `nestegg-core` and
//! contains:
//! - Connection pooling and pragmas
//! - Embedded Diesel migrations
//! - A single-writer actor that serializes mutations, each inside an
//!   immediate transaction
//! - Repository implementations and database-specific model types
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; `core` and the server work with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod goals;
pub mod notifications;
pub mod savings;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;
