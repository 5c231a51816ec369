use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Book a conversation was started about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub title: String,
    pub cover_url: Option<String>,
    pub book_id: Option<String>,
}

/// Direct-message thread between users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,

    /// Display names, parallel to `participant_ids`
    pub participants: Vec<String>,

    pub participant_ids: Vec<String>,

    /// Preview of the latest message
    pub last_message: String,

    /// Time of the latest activity
    pub timestamp: DateTime<Utc>,

    pub unread_count: u32,

    pub book_info: Option<BookInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        conversation_id: impl Into<String>,
        sender: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.into(),
            sender: sender.into(),
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

impl Conversation {
    /// Case-insensitive match on participant names, last message and book title
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&query);

        self.participants.iter().any(|p| hit(p))
            || hit(&self.last_message)
            || self.book_info.as_ref().is_some_and(|b| hit(&b.title))
    }

    pub fn mark_read(self) -> Self {
        Self {
            unread_count: 0,
            ..self
        }
    }

    pub fn with_last_message(self, last_message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            last_message: last_message.into(),
            timestamp: at,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Conversation {
        Conversation {
            id: "conv_1".to_string(),
            participants: vec!["Ana García".to_string(), "Carlos López".to_string()],
            participant_ids: vec!["user_ana".to_string(), "user_carlos".to_string()],
            last_message: "Do you want to swap books?".to_string(),
            timestamp: Utc::now(),
            unread_count: 2,
            book_info: Some(BookInfo {
                title: "Cien Años de Soledad".to_string(),
                cover_url: None,
                book_id: None,
            }),
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let conv = conversation();
        assert!(conv.matches("carlos"));
        assert!(conv.matches("SWAP"));
        assert!(conv.matches("soledad"));
        assert!(!conv.matches("tolkien"));
    }

    #[test]
    fn test_mark_read() {
        assert_eq!(conversation().mark_read().unread_count, 0);
    }
}
