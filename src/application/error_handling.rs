// src/application/error_handling.rs
//
// Maps internal errors to the response shown by the front end
//
// - Consistent error format for every command
// - Repository messages are passed through; internals are logged, not shown

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Nothing matched the request (404)
    NotFound,

    /// Input rejected before reaching a backend
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Action needs a logged-in user
    Unauthenticated,

    /// Local database failure
    Database,

    /// Backend answered with an error or could not be reached
    ExternalService,

    Configuration,

    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(message) => Self::new(ErrorType::NotFound, message, None),

            AppError::Unauthenticated => {
                Self::new(ErrorType::Unauthenticated, "Please log in first", None)
            }

            AppError::Domain(DomainError::InvalidCredentials(message)) => {
                Self::new(ErrorType::Validation, message, None)
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Api(message) => Self::new(ErrorType::ExternalService, message, None),

            AppError::Http { status, body } => Self::new(
                ErrorType::ExternalService,
                format!("Service answered HTTP {}", status),
                (!body.is_empty()).then_some(body),
            ),

            AppError::Network(detail) => {
                log::warn!("Network error: {}", detail);
                Self::new(ErrorType::ExternalService, "Service unreachable", Some(detail))
            }

            AppError::Decode(detail) => {
                log::warn!("Decode error: {}", detail);
                Self::new(ErrorType::ExternalService, "Unexpected response from service", Some(detail))
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => Self::new(
                ErrorType::Internal,
                "File system operation failed",
                Some(io_error.to_string()),
            ),

            AppError::Config(message) => Self::new(ErrorType::Configuration, message, None),

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    /// One line for terminal output
    pub fn to_display_string(&self) -> String {
        match &self.details {
            Some(details) => format!("{} ({})", self.message, details),
            None => self.message.clone(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_message() {
        let error = ErrorResponse::from_app_error(AppError::NotFound(
            "ISBN not found in OpenLibrary: 123".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "ISBN not found in OpenLibrary: 123");
    }

    #[test]
    fn test_invalid_credentials_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvalidCredentials("Invalid email".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.to_display_string(), "Invalid email");
    }

    #[test]
    fn test_unauthenticated() {
        let error = ErrorResponse::from(AppError::Unauthenticated);
        assert_eq!(error.error_type, ErrorType::Unauthenticated);
        assert!(!error.success);
    }

    #[test]
    fn test_http_details() {
        let error = ErrorResponse::from_app_error(AppError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert_eq!(error.to_display_string(), "Service answered HTTP 502 (bad gateway)");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Conversation");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Conversation not found"));
    }
}
