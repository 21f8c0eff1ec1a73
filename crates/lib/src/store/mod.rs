//! # Student Stores
//!
//! The `StudentStore` trait is the single seam between the Resource API and the
//! canonical collection. Two backends implement it: `MemoryStore` for ephemeral
//! use and tests, and `SqliteStore` for durable storage.

pub mod memory;
pub mod sqlite;

use crate::{
    errors::StoreError,
    types::{Student, StudentFields, StudentPatch},
};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use dyn_clone::DynClone;
use std::fmt::Debug;
use uuid::Uuid;

/// The four CRUD operations (plus listing) over the student collection.
///
/// Expected failures (`NotFound`, `InvalidInput`) are returned as typed errors.
/// Every write either applies completely or not at all.
#[async_trait]
pub trait StudentStore: Send + Sync + DynClone + Debug {
    /// Returns the name of the backend (e.g., "memory", "SQLite").
    fn name(&self) -> &str;

    /// Lists students newest-first, optionally keeping only those whose name
    /// contains `filter` case-insensitively.
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Student>, StoreError>;

    async fn get(&self, id: &str) -> Result<Student, StoreError>;

    /// Validates and persists a new student with a fresh id and timestamps.
    async fn create(&self, fields: StudentFields) -> Result<Student, StoreError>;

    /// Merges `patch` onto the stored student, re-validates, and replaces the
    /// mutable fields.
    async fn update(&self, id: &str, patch: StudentPatch) -> Result<Student, StoreError>;

    /// Removes the student and returns its id.
    async fn delete(&self, id: &str) -> Result<String, StoreError>;
}

dyn_clone::clone_trait_object!(StudentStore);

/// Prepares a list filter: blank filters select everything.
pub(crate) fn name_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
}

pub(crate) fn name_matches(name: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(needle) => name.to_lowercase().contains(needle),
        None => true,
    }
}

/// Current time at the precision both backends can round-trip.
pub(crate) fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn new_student_id() -> String {
    Uuid::new_v4().to_string()
}
