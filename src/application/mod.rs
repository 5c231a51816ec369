// src/application/mod.rs
//
// Application layer
//
// - Boundary between the front end and the repositories
// - View-models own screen state; DTOs flatten records for display
// - Errors are mapped to one response shape

pub mod dto;
pub mod error_handling;
pub mod state;
pub mod viewmodels;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
pub use viewmodels::*;
