// src/application/viewmodels/mod.rs
//
// View-models
//
// - One per screen; each is the only writer of its own state
// - Receive an action, mark Loading, call one repository, publish the outcome
// - No business rules beyond trivial input validation

pub mod auth_viewmodel;
pub mod book_lookup_viewmodel;
pub mod feed_viewmodel;
pub mod library_viewmodel;
pub mod messages_viewmodel;
pub mod profile_viewmodel;
pub mod register_viewmodel;
pub mod state;

#[cfg(test)]
mod test_support;

pub use auth_viewmodel::AuthViewModel;
pub use book_lookup_viewmodel::BookLookupViewModel;
pub use feed_viewmodel::FeedViewModel;
pub use library_viewmodel::LibraryViewModel;
pub use messages_viewmodel::MessagesViewModel;
pub use profile_viewmodel::ProfileViewModel;
pub use register_viewmodel::RegisterViewModel;
pub use state::{StateHandle, UiState};
