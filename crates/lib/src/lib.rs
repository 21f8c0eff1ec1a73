//! # Roster
//!
//! Core domain types and storage for the student roster: the `Student` record,
//! input validation, the typed `StoreError` taxonomy, and the `StudentStore`
//! trait with its in-memory and SQLite backends.

pub mod errors;
pub mod store;
pub mod types;
pub mod validation;

pub use errors::{Field, StoreError};
pub use store::{memory::MemoryStore, sqlite::SqliteStore, StudentStore};
pub use types::{DeletedStudent, Student, StudentFields, StudentPatch};
