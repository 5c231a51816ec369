// src/application/viewmodels/book_lookup_viewmodel.rs
//
// ISBN lookup screen: one lookup registers the book in the owner's catalog

use std::sync::Arc;

use super::state::{message_or, StateHandle, UiState};
use crate::domain::Book;
use crate::error::{AppError, AppResult};
use crate::events::{BookRegistered, EventBus};
use crate::repositories::OpenLibraryRepository;
use crate::services::SessionStore;

pub struct BookLookupViewModel {
    repo: Arc<dyn OpenLibraryRepository>,
    session: Arc<SessionStore>,
    event_bus: Arc<EventBus>,
    state: StateHandle<UiState<Book>>,
}

impl BookLookupViewModel {
    pub fn new(
        repo: Arc<dyn OpenLibraryRepository>,
        session: Arc<SessionStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            repo,
            session,
            event_bus,
            state: StateHandle::default(),
        }
    }

    pub fn state(&self) -> UiState<Book> {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UiState<Book>> {
        self.state.subscribe()
    }

    /// Look the ISBN up for the logged-in user.
    ///
    /// Without a session this fails with [`AppError::Unauthenticated`] and
    /// leaves the screen state untouched.
    pub async fn load_by_isbn(&self, isbn: &str) -> AppResult<UiState<Book>> {
        let session = self
            .session
            .current_session()
            .ok_or(AppError::Unauthenticated)?;

        self.state.set(UiState::Loading);

        let next = match self
            .repo
            .lookup_isbn(isbn.to_string(), session.user_email.clone(), true)
            .await
        {
            Ok(book) => {
                self.event_bus.emit(BookRegistered::new(
                    book.isbn().map(str::to_string),
                    book.title.clone(),
                    session.user_email.clone(),
                ));
                UiState::Success(book)
            }
            Err(e) => UiState::Error(message_or(&e, || {
                format!("Unknown error for {}", session.display_name())
            })),
        };

        Ok(self.state.set(next))
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}
