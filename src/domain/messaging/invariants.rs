use super::entity::{Conversation, Message};
use crate::domain::{DomainError, DomainResult};

pub fn validate_conversation(conversation: &Conversation) -> DomainResult<()> {
    if conversation.id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Conversation id cannot be empty".to_string(),
        ));
    }
    if conversation.participants.len() != conversation.participant_ids.len() {
        return Err(DomainError::InvariantViolation(format!(
            "Conversation {} has {} participant names but {} participant ids",
            conversation.id,
            conversation.participants.len(),
            conversation.participant_ids.len()
        )));
    }
    Ok(())
}

pub fn validate_message(message: &Message) -> DomainResult<()> {
    if message.content.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Message content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_mismatched_participants_fail() {
        let conversation = Conversation {
            id: "c".to_string(),
            participants: vec!["Ana".to_string()],
            participant_ids: vec![],
            last_message: String::new(),
            timestamp: Utc::now(),
            unread_count: 0,
            book_info: None,
        };
        assert!(validate_conversation(&conversation).is_err());
    }

    #[test]
    fn test_blank_message_fails() {
        let message = Message::new("c", "Ana", "user_ana", "   ");
        assert!(validate_message(&message).is_err());
    }
}
