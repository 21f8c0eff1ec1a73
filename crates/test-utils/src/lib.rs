use anyhow::Result;
use roster::{MemoryStore, SqliteStore, Student, StudentFields, StudentStore};
use std::sync::Arc;

// --- Test Setup ---

/// A helper struct holding a fresh store for each test.
pub struct TestSetup {
    pub store: Arc<dyn StudentStore>,
}

impl TestSetup {
    /// Creates an isolated in-memory store.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Creates an isolated in-memory SQLite database with the schema in place.
    pub async fn sqlite() -> Result<Self> {
        let store = SqliteStore::new(":memory:").await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Inserts `sample_students()` in order and returns the created records.
    pub async fn seed(&self) -> Result<Vec<Student>> {
        let mut created = Vec::new();
        for fields in sample_students() {
            created.push(self.store.create(fields).await?);
        }
        Ok(created)
    }
}

// --- Fixtures ---

pub fn student_fields(name: &str, age: i64, class: &str) -> StudentFields {
    StudentFields {
        name: name.to_string(),
        age,
        class: class.to_string(),
    }
}

/// A small roster with Vietnamese names, given name last.
pub fn sample_students() -> Vec<StudentFields> {
    vec![
        student_fields("Trần Thị Bình", 15, "9A2"),
        student_fields("Nguyễn Văn An", 16, "10A1"),
        student_fields("Lê Minh Châu", 17, "11B2"),
        student_fields("Phạm Quốc Việt", 16, "10A1"),
    ]
}
