// src/repositories/conversation_repository.rs
//
// Conversations and their messages. Local only; there is no messaging backend.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{BookInfo, Conversation, Message};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ConversationRepository: Send + Sync {
    /// All conversations, newest activity first
    fn list_conversations(&self) -> AppResult<Vec<Conversation>>;
    fn get_conversation(&self, id: &str) -> AppResult<Option<Conversation>>;
    /// Messages of one conversation, oldest first
    fn get_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>>;
    fn add_message(&self, message: &Message) -> AppResult<()>;
    fn add_conversation(&self, conversation: &Conversation) -> AppResult<()>;
    /// Replace the stored conversation with the same id. Unknown ids are ignored.
    fn update_conversation(&self, conversation: &Conversation) -> AppResult<()>;
    /// Remove a conversation together with its messages
    fn delete_conversation(&self, id: &str) -> AppResult<()>;
}

// ----------------------------------------------------------------------------
// In-memory
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: RwLock<Vec<Conversation>>,
    messages: RwLock<Vec<Message>>,
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Other("Conversation store lock poisoned".to_string())
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with two sample threads
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let at = |secs: i64| now - Duration::seconds(secs);

        let conversations = vec![
            Conversation {
                id: "1".to_string(),
                participants: vec!["User1".to_string(), "User2".to_string()],
                participant_ids: vec!["User1".to_string(), "User2".to_string()],
                last_message: "Hi! How are you?".to_string(),
                timestamp: at(10),
                unread_count: 1,
                book_info: None,
            },
            Conversation {
                id: "2".to_string(),
                participants: vec!["User1".to_string(), "User3".to_string()],
                participant_ids: vec!["User1".to_string(), "User3".to_string()],
                last_message: "See you tomorrow.".to_string(),
                timestamp: at(8),
                unread_count: 0,
                book_info: None,
            },
        ];

        let message = |id: &str, conv: &str, sender: &str, content: &str, secs: i64| Message {
            id: id.to_string(),
            conversation_id: conv.to_string(),
            sender: sender.to_string(),
            sender_id: sender.to_string(),
            content: content.to_string(),
            timestamp: at(secs),
        };
        let messages = vec![
            message("m1", "1", "User2", "Hi! How are you?", 10),
            message("m2", "1", "User1", "All good, and you?", 5),
            message("m3", "2", "User3", "See you tomorrow.", 8),
        ];

        Self {
            conversations: RwLock::new(conversations),
            messages: RwLock::new(messages),
        }
    }

    fn conversations(&self) -> AppResult<RwLockReadGuard<'_, Vec<Conversation>>> {
        self.conversations.read().map_err(poisoned)
    }

    fn conversations_mut(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Conversation>>> {
        self.conversations.write().map_err(poisoned)
    }

    fn messages(&self) -> AppResult<RwLockReadGuard<'_, Vec<Message>>> {
        self.messages.read().map_err(poisoned)
    }

    fn messages_mut(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Message>>> {
        self.messages.write().map_err(poisoned)
    }
}

impl ConversationRepository for InMemoryConversationRepository {
    fn list_conversations(&self) -> AppResult<Vec<Conversation>> {
        let mut list = self.conversations()?.clone();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(list)
    }

    fn get_conversation(&self, id: &str) -> AppResult<Option<Conversation>> {
        Ok(self.conversations()?.iter().find(|c| c.id == id).cloned())
    }

    fn get_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let mut list: Vec<Message> = self
            .messages()?
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(list)
    }

    fn add_message(&self, message: &Message) -> AppResult<()> {
        self.messages_mut()?.push(message.clone());
        Ok(())
    }

    fn add_conversation(&self, conversation: &Conversation) -> AppResult<()> {
        self.conversations_mut()?.push(conversation.clone());
        Ok(())
    }

    fn update_conversation(&self, conversation: &Conversation) -> AppResult<()> {
        let mut list = self.conversations_mut()?;
        if let Some(slot) = list.iter_mut().find(|c| c.id == conversation.id) {
            *slot = conversation.clone();
        }
        Ok(())
    }

    fn delete_conversation(&self, id: &str) -> AppResult<()> {
        self.conversations_mut()?.retain(|c| c.id != id);
        self.messages_mut()?.retain(|m| m.conversation_id != id);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// SQLite
// ----------------------------------------------------------------------------

pub struct SqliteConversationRepository {
    pool: Arc<ConnectionPool>,
}

fn conversion_error<E>(e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

fn from_millis(millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, millis))
}

impl SqliteConversationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_conversation(row: &Row) -> Result<Conversation, rusqlite::Error> {
        let participants_json: String = row.get("participants")?;
        let participant_ids_json: String = row.get("participant_ids")?;
        let book_info_json: Option<String> = row.get("book_info")?;
        let unread_count: i64 = row.get("unread_count")?;

        Ok(Conversation {
            id: row.get("id")?,
            participants: serde_json::from_str(&participants_json).map_err(conversion_error)?,
            participant_ids: serde_json::from_str(&participant_ids_json)
                .map_err(conversion_error)?,
            last_message: row.get("last_message")?,
            timestamp: from_millis(row.get("timestamp")?)?,
            unread_count: unread_count.max(0) as u32,
            book_info: book_info_json
                .map(|json| serde_json::from_str::<BookInfo>(&json))
                .transpose()
                .map_err(conversion_error)?,
        })
    }

    fn row_to_message(row: &Row) -> Result<Message, rusqlite::Error> {
        Ok(Message {
            id: row.get("id")?,
            conversation_id: row.get("conversation_id")?,
            sender: row.get("sender")?,
            sender_id: row.get("sender_id")?,
            content: row.get("content")?,
            timestamp: from_millis(row.get("timestamp")?)?,
        })
    }

    fn write_conversation(
        conn: &rusqlite::Connection,
        sql: &str,
        conversation: &Conversation,
    ) -> AppResult<usize> {
        let book_info = conversation
            .book_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let changed = conn.execute(
            sql,
            params![
                conversation.id,
                serde_json::to_string(&conversation.participants)?,
                serde_json::to_string(&conversation.participant_ids)?,
                conversation.last_message,
                conversation.timestamp.timestamp_millis(),
                conversation.unread_count as i64,
                book_info,
            ],
        )?;
        Ok(changed)
    }
}

impl ConversationRepository for SqliteConversationRepository {
    fn list_conversations(&self) -> AppResult<Vec<Conversation>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare("SELECT * FROM conversations ORDER BY timestamp DESC")?;
        let list = stmt
            .query_map([], Self::row_to_conversation)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(list)
    }

    fn get_conversation(&self, id: &str) -> AppResult<Option<Conversation>> {
        let conn = get_connection(&self.pool)?;
        let conversation = conn
            .query_row(
                "SELECT * FROM conversations WHERE id = ?1",
                params![id],
                Self::row_to_conversation,
            )
            .optional()?;
        Ok(conversation)
    }

    fn get_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT * FROM messages WHERE conversation_id = ?1 ORDER BY timestamp ASC, rowid ASC",
        )?;
        let list = stmt
            .query_map(params![conversation_id], Self::row_to_message)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(list)
    }

    fn add_message(&self, message: &Message) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "INSERT INTO messages (id, conversation_id, sender, sender_id, content, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message.id,
                message.conversation_id,
                message.sender,
                message.sender_id,
                message.content,
                message.timestamp.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn add_conversation(&self, conversation: &Conversation) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        Self::write_conversation(
            &conn,
            "INSERT INTO conversations (
                id, participants, participant_ids, last_message,
                timestamp, unread_count, book_info
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            conversation,
        )?;
        Ok(())
    }

    fn update_conversation(&self, conversation: &Conversation) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        let changed = Self::write_conversation(
            &conn,
            "UPDATE conversations SET
                participants = ?2, participant_ids = ?3, last_message = ?4,
                timestamp = ?5, unread_count = ?6, book_info = ?7
             WHERE id = ?1",
            conversation,
        )?;
        if changed == 0 {
            log::debug!("Conversation {} not stored; update ignored", conversation.id);
        }
        Ok(())
    }

    fn delete_conversation(&self, id: &str) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM messages WHERE conversation_id = ?1", params![id])?;
        tx.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn sqlite_repo() -> SqliteConversationRepository {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        SqliteConversationRepository::new(Arc::new(pool))
    }

    fn conversation(id: &str, secs_ago: i64) -> Conversation {
        Conversation {
            id: id.to_string(),
            participants: vec!["Ana".to_string(), "Carlos".to_string()],
            participant_ids: vec!["1".to_string(), "2".to_string()],
            last_message: format!("hello from {}", id),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000 - secs_ago * 1000).unwrap(),
            unread_count: 1,
            book_info: Some(BookInfo {
                title: "Dune".to_string(),
                cover_url: None,
                book_id: None,
            }),
        }
    }

    fn message(id: &str, conv: &str, millis: i64) -> Message {
        Message {
            id: id.to_string(),
            conversation_id: conv.to_string(),
            sender: "Ana".to_string(),
            sender_id: "1".to_string(),
            content: format!("message {}", id),
            timestamp: Utc.timestamp_millis_opt(millis).unwrap(),
        }
    }

    fn exercise(repo: &dyn ConversationRepository) {
        repo.add_conversation(&conversation("old", 60)).unwrap();
        repo.add_conversation(&conversation("new", 1)).unwrap();

        let ids: Vec<String> = repo
            .list_conversations()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);

        repo.add_message(&message("b", "old", 2_000)).unwrap();
        repo.add_message(&message("a", "old", 1_000)).unwrap();
        repo.add_message(&message("x", "new", 1_500)).unwrap();
        let ids: Vec<String> = repo
            .get_messages("old")
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        let updated = conversation("old", 0).mark_read();
        repo.update_conversation(&updated).unwrap();
        assert_eq!(repo.get_conversation("old").unwrap(), Some(updated));
        assert_eq!(repo.list_conversations().unwrap()[0].id, "old");

        repo.update_conversation(&conversation("ghost", 0)).unwrap();
        assert!(repo.get_conversation("ghost").unwrap().is_none());

        repo.delete_conversation("old").unwrap();
        assert!(repo.get_conversation("old").unwrap().is_none());
        assert!(repo.get_messages("old").unwrap().is_empty());
        assert_eq!(repo.get_messages("new").unwrap().len(), 1);
    }

    #[test]
    fn test_in_memory_contract() {
        exercise(&InMemoryConversationRepository::new());
    }

    #[test]
    fn test_sqlite_contract() {
        exercise(&sqlite_repo());
    }

    #[test]
    fn test_demo_data() {
        let repo = InMemoryConversationRepository::with_demo_data();
        let list = repo.list_conversations().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "2");
        assert_eq!(repo.get_messages("1").unwrap().len(), 2);
        assert_eq!(repo.get_messages("unknown").unwrap().len(), 0);
    }

    #[test]
    fn test_sqlite_round_trips_book_info() {
        let repo = sqlite_repo();
        let mut plain = conversation("plain", 5);
        plain.book_info = None;
        repo.add_conversation(&plain).unwrap();
        repo.add_conversation(&conversation("about_book", 3)).unwrap();

        assert_eq!(repo.get_conversation("plain").unwrap(), Some(plain));
        assert_eq!(
            repo.get_conversation("about_book")
                .unwrap()
                .and_then(|c| c.book_info)
                .map(|b| b.title),
            Some("Dune".to_string())
        );
    }
}
