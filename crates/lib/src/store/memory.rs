use super::{name_filter, name_matches, new_student_id, timestamp_now, StudentStore};
use crate::{
    errors::StoreError,
    types::{Student, StudentFields, StudentPatch},
    validation::validate_fields,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// An in-memory store. Clones share the same collection.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    // Kept in insertion order.
    students: Arc<RwLock<Vec<Student>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self, filter: Option<&str>) -> Result<Vec<Student>, StoreError> {
        let filter = name_filter(filter);
        let students = self.students.read().await;
        let mut matched: Vec<Student> = students
            .iter()
            .rev()
            .filter(|s| name_matches(&s.name, filter.as_deref()))
            .cloned()
            .collect();
        // Stable sort keeps later inserts first among equal timestamps.
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn get(&self, id: &str) -> Result<Student, StoreError> {
        self.students
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(&self, fields: StudentFields) -> Result<Student, StoreError> {
        let fields = validate_fields(fields)?;
        let now = timestamp_now();
        let student = Student {
            id: new_student_id(),
            name: fields.name,
            age: fields.age,
            class: fields.class,
            created_at: now,
            updated_at: now,
        };

        self.students.write().await.push(student.clone());
        debug!(id = %student.id, "Created student in memory store.");
        Ok(student)
    }

    async fn update(&self, id: &str, patch: StudentPatch) -> Result<Student, StoreError> {
        let mut students = self.students.write().await;
        let existing = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let fields = validate_fields(patch.merge_onto(existing))?;
        existing.name = fields.name;
        existing.age = fields.age;
        existing.class = fields.class;
        existing.updated_at = timestamp_now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<String, StoreError> {
        let mut students = self.students.write().await;
        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = students.remove(index);
        debug!(id = %removed.id, "Deleted student from memory store.");
        Ok(removed.id)
    }
}
