pub mod entity;
pub mod invariants;

pub use entity::{BookInfo, Conversation, Message};
pub use invariants::{validate_conversation, validate_message};
