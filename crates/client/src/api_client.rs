//! # API Client
//!
//! A client for the roster Resource API. Responses are mapped onto `ApiError`
//! so the synchronizer can tell input problems, vanished records, and
//! infrastructure failures apart.

use crate::cache::{sanitize_entries, Listing};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use roster::{DeletedStudent, Student, StudentFields, StudentPatch};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Failures from a Resource API call.
///
/// `InvalidInput` and `NotFound` carry the server's own message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// The text to show a user. Infrastructure details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidInput(message) | ApiError::NotFound(message) => message.clone(),
            ApiError::Unavailable(_) => "Something went wrong, please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Unavailable(err.to_string())
    }
}

/// The operations the synchronizer needs from the Resource API.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list(&self, name: Option<&str>) -> Result<Listing, ApiError>;
    async fn get(&self, id: &str) -> Result<Student, ApiError>;
    async fn create(&self, fields: &StudentFields) -> Result<Student, ApiError>;
    async fn update(&self, id: &str, patch: &StudentPatch) -> Result<Student, ApiError>;
    /// Returns the id of the removed student.
    async fn delete(&self, id: &str) -> Result<String, ApiError>;
}

/// The HTTP implementation of `StudentApi`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn students_url(&self) -> String {
        format!("{}/api/students", self.base_url)
    }

    fn student_url(&self, id: &str) -> String {
        format!("{}/api/students/{id}", self.base_url)
    }
}

/// Maps a non-success response onto `ApiError`, keeping the server's `error` text.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Server responded with {status}"));

    match status {
        StatusCode::BAD_REQUEST => ApiError::InvalidInput(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Unavailable(message),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Unavailable(format!("Failed to decode server response: {e}")))
}

#[async_trait]
impl StudentApi for ApiClient {
    async fn list(&self, name: Option<&str>) -> Result<Listing, ApiError> {
        let url = self.students_url();
        info!("Fetching students from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        let entries: Vec<Value> = decode(request.send().await?).await?;
        Ok(sanitize_entries(entries))
    }

    async fn get(&self, id: &str) -> Result<Student, ApiError> {
        let response = self.client.get(self.student_url(id)).send().await?;
        decode(response).await
    }

    async fn create(&self, fields: &StudentFields) -> Result<Student, ApiError> {
        info!("Creating student '{}'", fields.name);
        let response = self.client.post(self.students_url()).json(fields).send().await?;
        decode(response).await
    }

    async fn update(&self, id: &str, patch: &StudentPatch) -> Result<Student, ApiError> {
        info!("Updating student {}", id);
        let response = self.client.put(self.student_url(id)).json(patch).send().await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<String, ApiError> {
        info!("Deleting student {}", id);
        let response = self.client.delete(self.student_url(id)).send().await?;
        let deleted: DeletedStudent = decode(response).await?;
        Ok(deleted.id)
    }
}
