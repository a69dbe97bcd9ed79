use axum::{Json, extract::State};
use tracing::{error, warn};

use courier_crypto::EncryptedField;
use courier_types::api::{ChatEntry, GetChatRequest, Outcome, SendMessageRequest};

use crate::auth::AppState;

/// Store one message with an encrypted body. Sender and recipient are kept
/// as plain usernames and are not checked against registered accounts.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Json<Outcome> {
    let (message_data, message_iv) = state.cipher.encrypt(req.message.as_bytes()).to_hex();

    let db = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        db.db
            .insert_chat(&req.username, &req.friendname, &message_data, &message_iv)
    })
    .await;

    match result {
        Ok(Ok(())) => Json(Outcome::of(true)),
        Ok(Err(e)) => {
            error!("send-message insert failed: {:#}", e);
            Json(Outcome::of(false))
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            Json(Outcome::of(false))
        }
    }
}

/// Fetch the conversation between two names, either direction, decrypting
/// each body. Entries come back in storage retrieval order; a record that
/// fails to decrypt is skipped, not fatal.
pub async fn get_chat(
    State(state): State<AppState>,
    Json(req): Json<GetChatRequest>,
) -> Json<Vec<ChatEntry>> {
    let db = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        db.db.get_chats_between(&req.username, &req.friendname)
    })
    .await;

    let rows = match result {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => {
            error!("get-chat query failed: {:#}", e);
            return Json(vec![]);
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            return Json(vec![]);
        }
    };

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let plaintext = EncryptedField::from_hex(&row.message_data, &row.message_iv)
            .and_then(|field| state.cipher.decrypt(&field));

        match plaintext {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(message) => entries.push(ChatEntry {
                    sendername: row.sendername,
                    gettername: row.gettername,
                    message,
                }),
                Err(e) => {
                    warn!(
                        "skipping non-utf8 message from {} to {}: {}",
                        row.sendername, row.gettername, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "skipping undecryptable message from {} to {}: {}",
                    row.sendername, row.gettername, e
                );
            }
        }
    }

    Json(entries)
}
