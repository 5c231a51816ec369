// src/domain/mod.rs
//
// Domain root. All other modules import from `crate::domain::*`

pub mod book;
pub mod messaging;
pub mod session;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use book::{normalize_isbn, validate_book, validate_isbn, Author, Book, CoverSize, CoverUrl};

pub use messaging::{validate_conversation, validate_message, BookInfo, Conversation, Message};

pub use session::Session;

pub use user::{
    validate_credentials, validate_email, validate_password, Address, NewUser, User, UserProfile,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(String),

    /// Message is shown to the user unchanged
    #[error("{0}")]
    InvalidCredentials(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
