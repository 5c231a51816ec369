// src/application/viewmodels/messages_viewmodel.rs
//
// Conversation list and the open conversation

use std::sync::Arc;

use chrono::Utc;

use super::state::StateHandle;
use crate::domain::{validate_conversation, validate_message, BookInfo, Conversation, Message};
use crate::error::AppResult;
use crate::events::{ConversationCreated, ConversationDeleted, EventBus, MessageSent};
use crate::repositories::ConversationRepository;
use crate::services::SessionStore;

pub struct MessagesViewModel {
    repo: Arc<dyn ConversationRepository>,
    session: Arc<SessionStore>,
    event_bus: Arc<EventBus>,
    conversations: StateHandle<Vec<Conversation>>,
    messages: StateHandle<Vec<Message>>,
}

fn greeting(book_title: &str) -> String {
    format!("Hi! I'm interested in your book \"{}\"", book_title)
}

impl MessagesViewModel {
    pub fn new(
        repo: Arc<dyn ConversationRepository>,
        session: Arc<SessionStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            repo,
            session,
            event_bus,
            conversations: StateHandle::default(),
            messages: StateHandle::default(),
        }
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.get()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.get()
    }

    pub fn subscribe_conversations(&self) -> tokio::sync::watch::Receiver<Vec<Conversation>> {
        self.conversations.subscribe()
    }

    pub fn subscribe_messages(&self) -> tokio::sync::watch::Receiver<Vec<Message>> {
        self.messages.subscribe()
    }

    /// Sender name and id for outgoing messages
    fn sender(&self) -> (String, String) {
        let session = self.session.session();
        (session.display_name().to_string(), session.user_id)
    }

    pub fn load_conversations(&self) -> AppResult<Vec<Conversation>> {
        let list = self.repo.list_conversations()?;
        Ok(self.conversations.set(list))
    }

    /// Open a conversation and mark it read
    pub fn load_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let messages = self.repo.get_messages(conversation_id)?;

        if let Some(conversation) = self.repo.get_conversation(conversation_id)? {
            if conversation.unread_count > 0 {
                self.repo.update_conversation(&conversation.mark_read())?;
            }
        }
        self.conversations.update(|list| {
            for conversation in list.iter_mut().filter(|c| c.id == conversation_id) {
                conversation.unread_count = 0;
            }
        });

        Ok(self.messages.set(messages))
    }

    pub fn send_message(&self, conversation_id: &str, content: &str) -> AppResult<Message> {
        let (sender, sender_id) = self.sender();
        let message = Message::new(conversation_id, sender, sender_id, content);
        validate_message(&message)?;

        self.repo.add_message(&message)?;
        self.messages.update(|list| list.push(message.clone()));

        if let Some(conversation) = self.repo.get_conversation(conversation_id)? {
            let updated = conversation.with_last_message(content, message.timestamp);
            self.repo.update_conversation(&updated)?;
        }
        let (content, at) = (message.content.clone(), message.timestamp);
        self.conversations.update(|list| {
            for conversation in list.iter_mut().filter(|c| c.id == conversation_id) {
                conversation.last_message = content.clone();
                conversation.timestamp = at;
            }
            list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        });

        self.event_bus
            .emit(MessageSent::new(conversation_id, message.id.clone()));
        Ok(message)
    }

    /// Start a conversation with a book's owner; returns the new conversation id.
    ///
    /// The greeting is stored as the first message and the other side starts
    /// with one unread message.
    pub fn create_conversation_from_book(
        &self,
        other_user_id: &str,
        other_user_name: &str,
        book_title: &str,
        cover_url: Option<String>,
    ) -> AppResult<String> {
        let (me, my_id) = self.sender();
        let now = Utc::now();
        let id = format!("conv_{}_{}_{}", my_id, other_user_id, now.timestamp_millis());
        let text = greeting(book_title);

        let conversation = Conversation {
            id: id.clone(),
            participants: vec![me.clone(), other_user_name.to_string()],
            participant_ids: vec![my_id.clone(), other_user_id.to_string()],
            last_message: text.clone(),
            timestamp: now,
            unread_count: 1,
            book_info: Some(BookInfo {
                title: book_title.to_string(),
                cover_url,
                book_id: None,
            }),
        };
        let mut first = Message::new(&id, me, my_id, text);
        first.timestamp = now;
        validate_conversation(&conversation)?;

        self.repo.add_conversation(&conversation)?;
        self.repo.add_message(&first)?;

        self.conversations.update(|list| list.insert(0, conversation));
        self.messages.set(vec![first]);

        self.event_bus
            .emit(ConversationCreated::new(id.clone(), other_user_id, book_title));
        log::info!("Started conversation {} about \"{}\"", id, book_title);
        Ok(id)
    }

    /// Filter stored conversations; an empty query shows all of them
    pub fn search_conversations(&self, query: &str) -> AppResult<Vec<Conversation>> {
        let all = self.repo.list_conversations()?;
        let shown = if query.is_empty() {
            all
        } else {
            all.into_iter().filter(|c| c.matches(query)).collect()
        };
        Ok(self.conversations.set(shown))
    }

    pub fn delete_conversation(&self, conversation_id: &str) -> AppResult<()> {
        self.repo.delete_conversation(conversation_id)?;

        self.conversations
            .update(|list| list.retain(|c| c.id != conversation_id));
        self.messages.update(|list| {
            if list.first().is_some_and(|m| m.conversation_id == conversation_id) {
                list.clear();
            }
        });

        self.event_bus.emit(ConversationDeleted::new(conversation_id));
        Ok(())
    }

    pub fn conversation_by_id(&self, conversation_id: &str) -> Option<Conversation> {
        self.conversations
            .get()
            .into_iter()
            .find(|c| c.id == conversation_id)
    }
}
