//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - tbl_address_book(id, first_name, last_name, phone, email)
//!
//! `dump` renders the whole store as replayable SQL text.

pub mod dump;
pub mod schema;
pub mod sqlite;

pub use dump::DumpSummary;
pub use sqlite::ContactStore;
