use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use log::{error, warn};
use crate::store::StoreError;

pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";
pub const VALIDATION_MESSAGE: &str = "Validation failed";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("Validation failed: {0:?}")]
    ValidationFailed(BTreeMap<String, String>),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn employee_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Employee not found with ID: {}", id))
    }

    pub fn email_taken(email: &str) -> Self {
        AppError::AlreadyExists(format!("Employee with email {} already exists", email))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => AppError::email_taken(&email),
            StoreError::NotFound(id) => AppError::employee_not_found(id),
            StoreError::Database(err) => AppError::Unexpected(err.to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    pub timestamp: DateTime<Utc>,
}

impl AppError {
    fn to_body(&self) -> ErrorResponse {
        let (message, errors) = match self {
            AppError::NotFound(msg) | AppError::AlreadyExists(msg) => (msg.clone(), None),
            AppError::ValidationFailed(errors) => (VALIDATION_MESSAGE.to_string(), Some(errors.clone())),
            AppError::Unexpected(_) => (UNEXPECTED_MESSAGE.to_string(), None),
        };
        ErrorResponse {
            status: self.status_code().as_u16(),
            message,
            errors,
            timestamp: Utc::now(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unexpected(detail) => error!("Unexpected error occurred: {}", detail),
            other => warn!("{}", other),
        }
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}
