// src/events/mod.rs
//
// Internal event system. View-models emit, anything may subscribe.

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};

pub use types::{
    BookPublished, BookRegistered, ConversationCreated, ConversationDeleted, DomainEvent,
    MessageSent, SessionEnded, SessionStarted,
};

pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
