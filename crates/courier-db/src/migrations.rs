use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Usernames are deliberately not UNIQUE and ids carry no constraint:
        -- the external contract permits shadow accounts, and id assignment is
        -- serialized by the connection lock rather than the schema.
        CREATE TABLE IF NOT EXISTS users (
            username       TEXT NOT NULL,
            password_data  TEXT NOT NULL,
            password_iv    TEXT NOT NULL,
            id             INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_username
            ON users(username);

        CREATE TABLE IF NOT EXISTS chats (
            sendername    TEXT NOT NULL,
            gettername    TEXT NOT NULL,
            message_data  TEXT NOT NULL,
            message_iv    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chats_sender
            ON chats(sendername, gettername);
        CREATE INDEX IF NOT EXISTS idx_chats_getter
            ON chats(gettername, sendername);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
