// src/repositories/session_repository.rs
//
// Session persistence in the `preferences` key-value table

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::Session;
use crate::error::AppResult;

const KEY_IS_LOGGED_IN: &str = "is_logged_in";
const KEY_USER_ID: &str = "user_id";
const KEY_USER_NAME: &str = "user_name";
const KEY_USER_EMAIL: &str = "user_email";

#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    /// Stored session, or the logged-out default when nothing is stored
    fn load(&self) -> AppResult<Session>;
    fn save(&self, session: &Session) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct SqliteSessionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn read(conn: &rusqlite::Connection, key: &str) -> AppResult<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn load(&self) -> AppResult<Session> {
        let conn = get_connection(&self.pool)?;

        let is_logged_in = Self::read(&conn, KEY_IS_LOGGED_IN)?
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Session {
            is_logged_in,
            user_id: Self::read(&conn, KEY_USER_ID)?.unwrap_or_default(),
            user_name: Self::read(&conn, KEY_USER_NAME)?.unwrap_or_default(),
            user_email: Self::read(&conn, KEY_USER_EMAIL)?.unwrap_or_default(),
        })
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let entries = [
            (KEY_IS_LOGGED_IN, session.is_logged_in.to_string()),
            (KEY_USER_ID, session.user_id.clone()),
            (KEY_USER_NAME, session.user_name.clone()),
            (KEY_USER_EMAIL, session.user_email.clone()),
        ];
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "DELETE FROM preferences WHERE key IN (?1, ?2, ?3, ?4)",
            params![KEY_IS_LOGGED_IN, KEY_USER_ID, KEY_USER_NAME, KEY_USER_EMAIL],
        )?;
        Ok(())
    }
}
