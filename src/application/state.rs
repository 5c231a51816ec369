// src/application/state.rs
//
// Everything the front end needs, wired once at startup

use std::sync::Arc;

use crate::application::viewmodels::{
    AuthViewModel, BookLookupViewModel, FeedViewModel, LibraryViewModel, MessagesViewModel,
    ProfileViewModel, RegisterViewModel,
};
use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database, ConnectionPool,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{CatalogClient, OpenLibraryClient};
use crate::repositories::{
    ApiAuthRepository, ApiCatalogRepository, ApiOpenLibraryRepository, AuthRepository,
    CatalogRepository, ConversationRepository, OpenLibraryRepository, SqliteConversationRepository,
    SqliteSessionRepository,
};
use crate::services::SessionStore;

/// Application state. All fields are Arc-wrapped so front-end handlers can
/// share them freely.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub session: Arc<SessionStore>,

    pub auth: Arc<AuthViewModel>,
    pub register: Arc<RegisterViewModel>,
    pub book_lookup: Arc<BookLookupViewModel>,
    pub library: Arc<LibraryViewModel>,
    pub feed: Arc<FeedViewModel>,
    pub profile: Arc<ProfileViewModel>,
    pub messages: Arc<MessagesViewModel>,
}

impl AppState {
    /// Open the local database and build clients, repositories and view-models
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let db_path = match &config.database_path {
            Some(path) => path.clone(),
            None => get_database_path()?,
        };
        log::debug!("Opening database at {}", db_path.display());

        let pool = Arc::new(create_connection_pool(&db_path)?);
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        drop(conn);

        let catalog_client = Arc::new(CatalogClient::new(&config.catalog)?);
        let open_library_client = Arc::new(OpenLibraryClient::new(&config.open_library)?);

        let auth_repo: Arc<dyn AuthRepository> =
            Arc::new(ApiAuthRepository::new(catalog_client.clone()));
        let catalog_repo: Arc<dyn CatalogRepository> =
            Arc::new(ApiCatalogRepository::new(catalog_client));
        let open_library_repo: Arc<dyn OpenLibraryRepository> =
            Arc::new(ApiOpenLibraryRepository::new(
                open_library_client,
                catalog_repo.clone(),
                config.cover_base_url.clone(),
            ));
        let conversation_repo: Arc<dyn ConversationRepository> =
            Arc::new(SqliteConversationRepository::new(pool.clone()));

        let event_bus = Arc::new(EventBus::new());
        let session = Arc::new(SessionStore::new(
            Arc::new(SqliteSessionRepository::new(pool.clone())),
            event_bus.clone(),
        )?);

        Ok(Self {
            auth: Arc::new(AuthViewModel::new(auth_repo.clone(), session.clone())),
            register: Arc::new(RegisterViewModel::new(auth_repo.clone())),
            book_lookup: Arc::new(BookLookupViewModel::new(
                open_library_repo,
                session.clone(),
                event_bus.clone(),
            )),
            library: Arc::new(LibraryViewModel::new(catalog_repo.clone(), session.clone())),
            feed: Arc::new(FeedViewModel::new(catalog_repo, event_bus.clone())),
            profile: Arc::new(ProfileViewModel::new(auth_repo, session.clone())),
            messages: Arc::new(MessagesViewModel::new(
                conversation_repo,
                session.clone(),
                event_bus.clone(),
            )),
            pool,
            event_bus,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            database_path: Some(dir.path().join("bibliored.db")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let state = AppState::from_config(&config_in(&dir)).unwrap();
            assert!(state.session.current_session().is_none());
            state
                .session
                .set_logged_in("7", "Ana García", "ana@example.com")
                .unwrap();
        }

        let state = AppState::from_config(&config_in(&dir)).unwrap();
        let session = state.session.current_session().unwrap();
        assert_eq!(session.user_email, "ana@example.com");
    }

    #[test]
    fn test_conversations_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let state = AppState::from_config(&config_in(&dir)).unwrap();
            state.session.set_logged_in("7", "Ana", "ana@example.com").unwrap();
            state
                .messages
                .create_conversation_from_book("42", "Carlos", "Dune", None)
                .unwrap()
        };

        let state = AppState::from_config(&config_in(&dir)).unwrap();
        let conversations = state.messages.load_conversations().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].id, id);
        assert_eq!(state.messages.load_messages(&id).unwrap().len(), 1);
    }
}
