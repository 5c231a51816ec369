// src/services/session_store.rs
//
// The one session slot of the device: persisted, then published to
// every subscriber.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Session;
use crate::error::AppResult;
use crate::events::{EventBus, SessionEnded, SessionStarted};
use crate::repositories::SessionRepository;

pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    sender: watch::Sender<Session>,
    event_bus: Arc<EventBus>,
}

impl SessionStore {
    /// Load the persisted session and start publishing it
    pub fn new(repo: Arc<dyn SessionRepository>, event_bus: Arc<EventBus>) -> AppResult<Self> {
        let session = repo.load()?;
        if session.is_logged_in {
            log::debug!("Restored session for {}", session.user_email);
        }
        let (sender, _) = watch::channel(session);

        Ok(Self {
            repo,
            sender,
            event_bus,
        })
    }

    /// Stream that always holds the latest session
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    pub fn session(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// The session, only while someone is logged in
    pub fn current_session(&self) -> Option<Session> {
        let session = self.sender.borrow();
        session.is_logged_in.then(|| session.clone())
    }

    pub fn set_logged_in(
        &self,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
    ) -> AppResult<()> {
        let session = Session::logged_in(user_id, user_name, user_email);
        self.repo.save(&session)?;

        self.event_bus
            .emit(SessionStarted::new(session.user_id.clone(), session.user_email.clone()));
        self.sender.send_replace(session);
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.repo.clear()?;

        self.event_bus.emit(SessionEnded::new());
        self.sender.send_replace(Session::logged_out());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::error::AppError;
    use crate::repositories::{MockSessionRepository, SqliteSessionRepository};

    fn sqlite_store() -> SessionStore {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let repo = SqliteSessionRepository::new(Arc::new(pool));
        SessionStore::new(Arc::new(repo), Arc::new(EventBus::new())).unwrap()
    }

    #[test]
    fn test_set_read_clear_round_trip() {
        let store = sqlite_store();
        assert!(store.current_session().is_none());

        store
            .set_logged_in("7", "Ana García", "ana@example.com")
            .unwrap();

        let session = store.current_session().unwrap();
        assert_eq!(session.user_id, "7");
        assert_eq!(session.user_name, "Ana García");
        assert_eq!(session.user_email, "ana@example.com");

        store.clear().unwrap();
        assert_eq!(store.session(), Session::logged_out());
        assert!(store.current_session().is_none());
    }

    #[test]
    fn test_restores_persisted_session() {
        let mut repo = MockSessionRepository::new();
        repo.expect_load()
            .times(1)
            .returning(|| Ok(Session::logged_in("1", "Carlos", "carlos@example.com")));

        let store = SessionStore::new(Arc::new(repo), Arc::new(EventBus::new())).unwrap();
        assert_eq!(store.session().user_email, "carlos@example.com");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = sqlite_store();
        let mut rx = store.subscribe();
        assert!(!rx.borrow().is_logged_in);

        store.set_logged_in("7", "Ana", "ana@example.com").unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_logged_in);

        store.clear().unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_logged_in);
    }

    #[test]
    fn test_failed_save_publishes_nothing() {
        let mut repo = MockSessionRepository::new();
        repo.expect_load().returning(|| Ok(Session::logged_out()));
        repo.expect_save()
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let bus = Arc::new(EventBus::new());
        let store = SessionStore::new(Arc::new(repo), Arc::clone(&bus)).unwrap();

        assert!(store.set_logged_in("1", "A", "a@b.c").is_err());
        assert!(store.current_session().is_none());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_events_emitted() {
        let bus = Arc::new(EventBus::new());
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let store = SessionStore::new(
            Arc::new(SqliteSessionRepository::new(Arc::new(pool))),
            Arc::clone(&bus),
        )
        .unwrap();

        store.set_logged_in("7", "Ana", "ana@example.com").unwrap();
        store.clear().unwrap();

        let types: Vec<String> = bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["SessionStarted", "SessionEnded"]);
    }
}
