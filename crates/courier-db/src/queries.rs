use crate::Database;
use crate::models::{ChatRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Insert a new account under the next sequential id and return that id.
    /// The max(id) read and the insert run inside one connection lock, so
    /// concurrent registrations cannot observe the same maximum.
    pub fn create_user(
        &self,
        username: &str,
        password_data: &str,
        password_iv: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            let next_id: i64 =
                conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM users", [], |row| {
                    row.get(0)
                })?;

            conn.execute(
                "INSERT INTO users (username, password_data, password_iv, id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![username, password_data, password_iv, next_id],
            )?;

            Ok(next_id)
        })
    }

    /// First account stored under this username, in insertion order. With
    /// shadow accounts permitted, later registrations under the same name are
    /// unreachable here.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    /// Every account, in storage retrieval order.
    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, password_data, password_iv FROM users")?;

            let rows = stmt
                .query_map([], map_user_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Chats --

    pub fn insert_chat(
        &self,
        sendername: &str,
        gettername: &str,
        message_data: &str,
        message_iv: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chats (sendername, gettername, message_data, message_iv) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![sendername, gettername, message_data, message_iv],
            )?;
            Ok(())
        })
    }

    /// All messages between the two names, either direction. No ORDER BY:
    /// retrieval order is whatever the store returns (insertion order in
    /// practice, not guaranteed chronological).
    pub fn get_chats_between(&self, a: &str, b: &str) -> Result<Vec<ChatRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT sendername, gettername, message_data, message_iv FROM chats
                 WHERE (sendername = ?1 AND gettername = ?2)
                    OR (sendername = ?2 AND gettername = ?1)",
            )?;

            let rows = stmt
                .query_map([a, b], |row| {
                    Ok(ChatRow {
                        sendername: row.get(0)?,
                        gettername: row.get(1)?,
                        message_data: row.get(2)?,
                        message_iv: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_data, password_iv FROM users WHERE username = ?1 LIMIT 1",
    )?;

    let row = stmt.query_row([username], map_user_row).optional()?;

    Ok(row)
}

fn map_user_row(row: &rusqlite::Row<'_>) -> std::result::Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_data: row.get(2)?,
        password_iv: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
