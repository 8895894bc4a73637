//! # addrbook - Single-user address book
//!
//! A small contact manager backed by a local SQLite file.
//!
//! addrbook provides:
//! - A `Contact` record type (first name, last name, phone, email)
//! - `ContactStore`, a storage gateway over one SQLite table
//! - SQL text dumps that can be replayed into a fresh store
//! - `ShellState`, explicit presentation state driven by the CLI

pub mod contact;
pub mod storage;
pub mod shell;
pub mod ui;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use contact::{Contact, ContactFields, SortOrder};
pub use shell::ShellState;
pub use storage::ContactStore;

/// Result type alias for addrbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for addrbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Contact not found: {0}")]
    NotFound(i64),

    #[error("Config error: {0}")]
    Config(String),
}
