// events/types.rs
//
// Domain events. Each one is an immutable fact that has already happened
// and carries only what a listener needs to react.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub trait DomainEvent: std::fmt::Debug + Clone {
    fn event_id(&self) -> Uuid;
    fn occurred_at(&self) -> DateTime<Utc>;
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// SESSION
// ============================================================================

/// A user logged in and the session was persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub user_email: String,
}

impl SessionStarted {
    pub fn new(user_id: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id: user_id.into(),
            user_email: user_email.into(),
        }
    }
}

domain_event!(SessionStarted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl SessionEnded {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for SessionEnded {
    fn default() -> Self {
        Self::new()
    }
}

domain_event!(SessionEnded);

// ============================================================================
// BOOKS
// ============================================================================

/// A looked-up book was registered in the owner's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub isbn: Option<String>,
    pub title: String,
    pub owner_email: String,
}

impl BookRegistered {
    pub fn new(isbn: Option<String>, title: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            isbn,
            title: title.into(),
            owner_email: owner_email.into(),
        }
    }
}

domain_event!(BookRegistered);

/// A book was put on the exchange feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPublished {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub publication_key: Option<String>,
    pub title: String,
    pub owner_name: String,
}

impl BookPublished {
    pub fn new(
        publication_key: Option<String>,
        title: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            publication_key,
            title: title.into(),
            owner_name: owner_name.into(),
        }
    }
}

domain_event!(BookPublished);

// ============================================================================
// MESSAGING
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub conversation_id: String,
    pub other_user_id: String,
    pub book_title: String,
}

impl ConversationCreated {
    pub fn new(
        conversation_id: impl Into<String>,
        other_user_id: impl Into<String>,
        book_title: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            conversation_id: conversation_id.into(),
            other_user_id: other_user_id.into(),
            book_title: book_title.into(),
        }
    }
}

domain_event!(ConversationCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSent {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub conversation_id: String,
    pub message_id: String,
}

impl MessageSent {
    pub fn new(conversation_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            conversation_id: conversation_id.into(),
            message_id: message_id.into(),
        }
    }
}

domain_event!(MessageSent);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub conversation_id: String,
}

impl ConversationDeleted {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            conversation_id: conversation_id.into(),
        }
    }
}

domain_event!(ConversationDeleted);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(SessionStarted::new("1", "a@b.c").event_type(), "SessionStarted");
        assert_eq!(BookPublished::new(None, "Dune", "Ana").event_type(), "BookPublished");
    }

    #[test]
    fn test_events_have_unique_ids() {
        let a = MessageSent::new("c", "m1");
        let b = MessageSent::new("c", "m1");
        assert_ne!(a.event_id(), b.event_id());
    }
}
