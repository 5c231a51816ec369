// src/application/dto/mod.rs
//
// Display records for the front end
//
// - Flat, serialisable structs with every field pre-formatted
// - Built from domain records only, never converted back

use serde::{Deserialize, Serialize};

use crate::domain::{Book, Conversation, CoverSize, Message, Session, UserProfile};

// ============================================================================
// BOOK DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
    pub title: String,
    pub authors: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub owner: Option<String>,
    pub for_exchange: bool,
    pub as_gift: bool,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.author_line(),
            isbn: book.isbn().map(str::to_string),
            description: book.description.clone(),
            cover_url: book
                .cover
                .as_ref()
                .and_then(|c| c.get(CoverSize::Medium))
                .map(str::to_string),
            owner: book.owner_name.clone(),
            for_exchange: book.for_exchange,
            as_gift: book.as_gift,
        }
    }
}

// ============================================================================
// MESSAGING DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDto {
    pub id: String,
    pub participants: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread_count: u32,
    pub book_title: Option<String>,
}

impl From<&Conversation> for ConversationDto {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            participants: conversation.participants.join(", "),
            last_message: conversation.last_message.clone(),
            timestamp: conversation.timestamp.to_rfc3339(),
            unread_count: conversation.unread_count,
            book_title: conversation.book_info.as_ref().map(|b| b.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            sender: message.sender.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

// ============================================================================
// ACCOUNT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDto {
    pub logged_in: bool,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            logged_in: session.is_logged_in,
            user_id: session.user_id.clone(),
            user_name: session.user_name.clone(),
            user_email: session.user_email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDto {
    pub full_name: String,
    pub email: String,
    pub photo_url: String,
    pub address: String,
}

impl From<&UserProfile> for ProfileDto {
    fn from(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            photo_url: profile.photo_url.clone(),
            address: profile
                .address
                .as_ref()
                .map(|a| a.to_display_string())
                .unwrap_or_default(),
        }
    }
}
