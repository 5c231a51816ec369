// src/services/mod.rs
//
// Services shared by several view-models

pub mod session_store;

pub use session_store::SessionStore;
