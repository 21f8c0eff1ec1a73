use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student record as held by the canonical store and mirrored by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub class: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The full set of mutable fields, as supplied when creating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub age: i64,
    pub class: String,
}

/// A partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl StudentPatch {
    /// Applies the patch on top of the current field values.
    pub fn merge_onto(&self, student: &Student) -> StudentFields {
        StudentFields {
            name: self.name.clone().unwrap_or_else(|| student.name.clone()),
            age: self.age.unwrap_or(student.age),
            class: self.class.clone().unwrap_or_else(|| student.class.clone()),
        }
    }
}

impl From<StudentFields> for StudentPatch {
    fn from(fields: StudentFields) -> Self {
        Self {
            name: Some(fields.name),
            age: Some(fields.age),
            class: Some(fields.class),
        }
    }
}

/// The body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedStudent {
    pub id: String,
    #[serde(default)]
    pub message: String,
}
