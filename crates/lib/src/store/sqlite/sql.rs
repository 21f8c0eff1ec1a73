//! # SQLite Specific SQL Queries
//!
//! SQL strings for the `SqliteStore`, kept apart from the store logic.

/// `seq` records insertion order and breaks ties between equal timestamps.
pub const CREATE_STUDENTS_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS students (
        seq INTEGER PRIMARY KEY,
        id TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        class TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

pub const ALL_TABLE_CREATION_SQL: &[&str] = &[CREATE_STUDENTS_TABLE_SQL];

pub const SELECT_ALL_STUDENTS_SQL: &str = "
    SELECT id, name, age, class, created_at, updated_at
    FROM students
    ORDER BY created_at DESC, seq DESC;
";

pub const SELECT_STUDENT_BY_ID_SQL: &str =
    "SELECT id, name, age, class, created_at, updated_at FROM students WHERE id = ?";

pub const INSERT_STUDENT_SQL: &str =
    "INSERT INTO students (id, name, age, class, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)";

pub const UPDATE_STUDENT_SQL: &str =
    "UPDATE students SET name = ?, age = ?, class = ?, updated_at = ? WHERE id = ?";

pub const DELETE_STUDENT_SQL: &str = "DELETE FROM students WHERE id = ?";
