// Fixtures shared by the view-model tests

use std::sync::Arc;

use crate::domain::Session;
use crate::events::EventBus;
use crate::repositories::MockSessionRepository;
use crate::services::SessionStore;

fn store_with(initial: Session) -> Arc<SessionStore> {
    let mut repo = MockSessionRepository::new();
    repo.expect_load().returning(move || Ok(initial.clone()));
    repo.expect_save().returning(|_| Ok(()));
    repo.expect_clear().returning(|| Ok(()));

    Arc::new(SessionStore::new(Arc::new(repo), Arc::new(EventBus::new())).unwrap())
}

pub fn logged_in_store() -> Arc<SessionStore> {
    store_with(Session::logged_in("7", "Ana García", "ana@example.com"))
}

pub fn logged_out_store() -> Arc<SessionStore> {
    store_with(Session::logged_out())
}
