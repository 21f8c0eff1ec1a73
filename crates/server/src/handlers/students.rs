//! # Student Route Handlers
//!
//! CRUD endpoints over the student collection. Expected failures come back
//! from the store as `StoreError` and are turned into responses by `AppError`.

use crate::{errors::AppError, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use roster::{validation::require_fields, DeletedStudent, Student, StudentPatch};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize, Debug, Default)]
pub struct ListStudentsParams {
    pub name: Option<String>,
}

fn decode_body(payload: Result<Json<StudentPatch>, JsonRejection>) -> Result<StudentPatch, AppError> {
    payload
        .map(|Json(patch)| patch)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// `GET /api/students?name=<substring>`
pub async fn list_students_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListStudentsParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = app_state.store.list(params.name.as_deref()).await?;
    info!(
        filter = ?params.name,
        count = students.len(),
        "Listed students."
    );
    Ok(Json(students))
}

/// `GET /api/students/{id}`
pub async fn get_student_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = app_state.store.get(&id).await?;
    Ok(Json(student))
}

/// `POST /api/students`
///
/// All three fields are required; the created student is returned with `201 Created`.
pub async fn create_student_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let fields = require_fields(decode_body(payload)?)?;
    let student = app_state.store.create(fields).await?;
    info!(id = %student.id, "Created student.");
    Ok((StatusCode::CREATED, Json(student)))
}

/// `PUT /api/students/{id}`
///
/// Accepts a partial body; omitted fields keep their stored values.
pub async fn update_student_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Student>, AppError> {
    let patch = decode_body(payload)?;
    let student = app_state.store.update(&id, patch).await?;
    info!(id = %student.id, "Updated student.");
    Ok(Json(student))
}

/// `DELETE /api/students/{id}`
pub async fn delete_student_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedStudent>, AppError> {
    let id = app_state.store.delete(&id).await?;
    info!(id = %id, "Deleted student.");
    Ok(Json(DeletedStudent {
        id,
        message: "Student deleted.".to_string(),
    }))
}
