// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Remote repositories map DTOs to domain records and transport errors to
//   readable messages
// - Local repositories are plain data mappers over SQLite
// - NO event emission
// - NO UI state

pub mod auth_repository;
pub mod catalog_repository;
pub mod conversation_repository;
pub mod openlibrary_repository;
pub mod session_repository;

pub use auth_repository::{ApiAuthRepository, AuthRepository};
pub use catalog_repository::{ApiCatalogRepository, CatalogRepository};
pub use conversation_repository::{
    ConversationRepository, InMemoryConversationRepository, SqliteConversationRepository,
};
pub use openlibrary_repository::{ApiOpenLibraryRepository, OpenLibraryRepository};
pub use session_repository::{SessionRepository, SqliteSessionRepository};

#[cfg(test)]
pub use auth_repository::MockAuthRepository;
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use conversation_repository::MockConversationRepository;
#[cfg(test)]
pub use openlibrary_repository::MockOpenLibraryRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;

use crate::error::AppError;

/// Turn a catalog transport failure into the message shown to the user.
///
/// Non-2xx answers become `"{prefix}: {body}"`, undecodable bodies name the
/// endpoint. Everything else passes through.
pub(crate) fn describe_failure(error: AppError, endpoint: &str, prefix: &str) -> AppError {
    match error {
        AppError::Http { status, body } => {
            log::warn!("{} answered HTTP {}", endpoint, status);
            AppError::Api(format!("{}: {}", prefix, body))
        }
        AppError::Decode(detail) => AppError::Api(format!(
            "Malformed JSON in response from {}: {}",
            endpoint, detail
        )),
        other => other,
    }
}
