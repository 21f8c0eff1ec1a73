use super::{name_filter, name_matches, new_student_id, timestamp_now, StudentStore};
use crate::{
    errors::StoreError,
    types::{Student, StudentFields, StudentPatch},
    validation::validate_fields,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::{
    fmt::{self, Debug},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::{debug, info};
use turso::{params, Connection, Database, Row, Value as TursoValue};

pub mod sql;

/// A store backed by a local SQLite database through Turso.
///
/// Clones share the same database and the same write lock, so read-modify-write
/// sequences from different handlers never interleave.
#[derive(Clone)]
pub struct SqliteStore {
    pub db: Database,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `db_path` and ensures the schema exists.
    ///
    /// Use ":memory:" for an isolated in-memory database; clone the store to
    /// share it.
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        let db = turso::Builder::new_local(db_path).build().await?;
        let store = Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        };
        store.initialize_schema().await?;
        info!(db_path = %db_path, "Initialized SQLite student store.");
        Ok(store)
    }

    /// Creates the tables if they do not exist. Safe to call repeatedly.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.db.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }

    async fn find(conn: &Connection, id: &str) -> Result<Option<Student>, StoreError> {
        let mut rows = conn
            .query(sql::SELECT_STUDENT_BY_ID_SQL, params![id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(student_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

impl Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn text_column(row: &Row, index: usize, column: &str) -> Result<String, StoreError> {
    match row.get_value(index)? {
        TursoValue::Text(s) => Ok(s),
        other => Err(StoreError::Unavailable(format!(
            "Unexpected value for column '{column}': {other:?}"
        ))),
    }
}

fn timestamp_column(row: &Row, index: usize, column: &str) -> Result<DateTime<Utc>, StoreError> {
    let raw = text_column(row, index, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            StoreError::Unavailable(format!("Failed to parse {column} '{raw}': {e}"))
        })
}

fn student_from_row(row: &Row) -> Result<Student, StoreError> {
    let age = match row.get_value(2)? {
        TursoValue::Integer(age) => age,
        other => {
            return Err(StoreError::Unavailable(format!(
                "Unexpected value for column 'age': {other:?}"
            )))
        }
    };

    Ok(Student {
        id: text_column(row, 0, "id")?,
        name: text_column(row, 1, "name")?,
        age,
        class: text_column(row, 3, "class")?,
        created_at: timestamp_column(row, 4, "created_at")?,
        updated_at: timestamp_column(row, 5, "updated_at")?,
    })
}

#[async_trait]
impl StudentStore for SqliteStore {
    fn name(&self) -> &str {
        "SQLite"
    }

    async fn list(&self, filter: Option<&str>) -> Result<Vec<Student>, StoreError> {
        let filter = name_filter(filter);
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::SELECT_ALL_STUDENTS_SQL, ()).await?;

        // SQLite's LOWER() only folds ASCII, so matching happens here.
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            let student = student_from_row(&row)?;
            if name_matches(&student.name, filter.as_deref()) {
                students.push(student);
            }
        }
        Ok(students)
    }

    async fn get(&self, id: &str) -> Result<Student, StoreError> {
        let conn = self.db.connect()?;
        Self::find(&conn, id)
            .await?
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

        let _guard = self.write_lock.lock().await;
        let conn = self.db.connect()?;
        conn.execute(
            sql::INSERT_STUDENT_SQL,
            params![
                student.id.clone(),
                student.name.clone(),
                student.age,
                student.class.clone(),
                format_timestamp(&student.created_at),
                format_timestamp(&student.updated_at)
            ],
        )
        .await?;

        debug!(id = %student.id, "Inserted student.");
        Ok(student)
    }

    async fn update(&self, id: &str, patch: StudentPatch) -> Result<Student, StoreError> {
        let _guard = self.write_lock.lock().await;
        let conn = self.db.connect()?;
        let existing = Self::find(&conn, id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let fields = validate_fields(patch.merge_onto(&existing))?;
        let updated = Student {
            name: fields.name,
            age: fields.age,
            class: fields.class,
            updated_at: timestamp_now(),
            ..existing
        };

        conn.execute(
            sql::UPDATE_STUDENT_SQL,
            params![
                updated.name.clone(),
                updated.age,
                updated.class.clone(),
                format_timestamp(&updated.updated_at),
                updated.id.clone()
            ],
        )
        .await?;

        debug!(id = %updated.id, "Updated student.");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock().await;
        let conn = self.db.connect()?;
        if Self::find(&conn, id).await?.is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        conn.execute(sql::DELETE_STUDENT_SQL, params![id]).await?;
        debug!(id = %id, "Deleted student.");
        Ok(id.to_string())
    }
}
