use serde::{Deserialize, Serialize};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Boolean outcome shared by register, login and send-message.
#[derive(Debug, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
}

impl Outcome {
    pub fn of(success: bool) -> Self {
        Self { success }
    }
}

// -- Chats --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    /// Sender.
    pub username: String,
    /// Recipient.
    pub friendname: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetChatRequest {
    pub username: String,
    pub friendname: String,
}

/// One decrypted message, direction preserved as stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sendername: String,
    pub gettername: String,
    pub message: String,
}

// -- Directory --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetUsersRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: i64,
    pub username: String,
}
