// src/lib.rs
// BiblioRed - catalogue physical books and swap them with other readers
//
// Architecture:
// - Domain: plain records plus their invariants
// - Integrations: HTTP clients for the catalog backend and OpenLibrary
// - Repositories: map wire data to domain records; local data lives in SQLite
// - Application: one view-model per screen, publishing UiState through watch channels
// - Events: in-process bus for things that happened

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    normalize_isbn, validate_book, validate_conversation, validate_credentials, validate_email,
    validate_isbn, validate_message, validate_password, Address, Author, Book, BookInfo,
    Conversation, CoverSize, CoverUrl, DomainError, Message, NewUser, Session, User, UserProfile,
};

// ============================================================================
// PUBLIC API - Errors and configuration
// ============================================================================

pub use config::{ApiConfig, AppConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, BookPublished, BookRegistered, ConversationCreated, ConversationDeleted,
    DomainEvent, EventBus, EventLogEntry, MessageSent, SessionEnded, SessionStarted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories and services
// ============================================================================

pub use repositories::{
    ApiAuthRepository, ApiCatalogRepository, ApiOpenLibraryRepository, AuthRepository,
    CatalogRepository, ConversationRepository, InMemoryConversationRepository,
    OpenLibraryRepository, SessionRepository, SqliteConversationRepository,
    SqliteSessionRepository,
};
pub use services::SessionStore;

// ============================================================================
// PUBLIC API - Application layer
// ============================================================================

pub use application::{
    AppState, AuthViewModel, BookLookupViewModel, ErrorResponse, FeedViewModel, LibraryViewModel,
    MessagesViewModel, ProfileViewModel, RegisterViewModel, UiState,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    is_host_resolvable, CatalogApi, CatalogClient, OpenLibraryApi, OpenLibraryClient,
};
