use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The mutable fields of a student record, used to attribute validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
    Class,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Class => "class",
        };
        f.write_str(name)
    }
}

/// Failures a `StudentStore` reports to its callers.
///
/// `InvalidInput` and `NotFound` are expected outcomes and carry a message that is
/// safe to show to a user. `Unavailable` wraps backing-store faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: Field, reason: String },
    #[error("Student not found: {0}")]
    NotFound(String),
    #[error("Data store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<turso::Error> for StoreError {
    fn from(err: turso::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
