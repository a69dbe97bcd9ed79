/// Database row types — these map directly to SQLite rows.
/// The `*_data`/`*_iv` columns hold the hex halves of an encrypted field.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_data: String,
    pub password_iv: String,
}

pub struct ChatRow {
    pub sendername: String,
    pub gettername: String,
    pub message_data: String,
    pub message_iv: String,
}
