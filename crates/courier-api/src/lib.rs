/// HTTP handlers for the five Courier operations.
///
/// Every per-request failure is converted to the declared output shape
/// (`{success:false}` or an empty array) at the handler boundary; nothing
/// below the transport layer surfaces as a raw error status.
pub mod auth;
pub mod chats;
pub mod users;

use axum::{Router, routing::post};

use crate::auth::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/send-message", post(chats::send_message))
        .route("/get-chat", post(chats::get_chat))
        .route("/get-users", post(users::get_users))
        .with_state(state)
}
