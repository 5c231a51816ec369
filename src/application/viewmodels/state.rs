// src/application/viewmodels/state.rs
//
// Screen state shared by every view-model

use serde::Serialize;
use tokio::sync::watch;

use crate::error::AppError;

/// Four-state screen pattern. Only the owning view-model moves it forward;
/// it goes back to `Idle` on an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum UiState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            UiState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Single-writer, many-reader cell backed by a `watch` channel.
///
/// Readers may see the previous value until a `set` returns.
pub struct StateHandle<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> StateHandle<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Publish `value` and hand it back to the caller
    pub fn set(&self, value: T) -> T {
        self.sender.send_replace(value.clone());
        value
    }

    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(modify);
    }
}

impl<T: Clone + Default> Default for StateHandle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Error text for the screen, or `fallback` when the error has none
pub(crate) fn message_or(error: &AppError, fallback: impl FnOnce() -> String) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback()
    } else {
        message
    }
}
