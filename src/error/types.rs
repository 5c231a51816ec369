// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-2xx response from a backend, with the raw error body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, timeout or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the JSON shape we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// Descriptive failure produced by a repository, shown as-is to the user
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    NotFound(String),

    #[error("No user is logged in")]
    Unauthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Http {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
