use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{error, info, warn};

use courier_crypto::{CipherBox, EncryptedField};
use courier_db::Database;
use courier_types::api::{LoginRequest, Outcome, RegisterRequest};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub cipher: CipherBox,
}

/// Register a new account. The credential is encrypted before it is stored;
/// the id is the next value in the sequence. No duplicate-username check is
/// performed: registering an existing name creates a shadow account that
/// login will never resolve to.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Json<Outcome> {
    let (password_data, password_iv) = state.cipher.encrypt(req.password.as_bytes()).to_hex();

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let username = req.username.clone();
    let result = tokio::task::spawn_blocking(move || {
        db.db.create_user(&username, &password_data, &password_iv)
    })
    .await;

    match result {
        Ok(Ok(id)) => {
            info!("registered user {} with id {}", req.username, id);
            Json(Outcome::of(true))
        }
        Ok(Err(e)) => {
            error!("register failed for {}: {:#}", req.username, e);
            Json(Outcome::of(false))
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            Json(Outcome::of(false))
        }
    }
}

/// Verify a login attempt by decrypting the stored credential and comparing
/// plaintexts. Unknown accounts and undecryptable records both answer false;
/// a corrupt row must never take the request down.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Json<Outcome> {
    let db = state.clone();
    let username = req.username.clone();
    let result =
        tokio::task::spawn_blocking(move || db.db.get_user_by_username(&username)).await;

    let row = match result {
        Ok(Ok(Some(row))) => row,
        Ok(Ok(None)) => return Json(Outcome::of(false)),
        Ok(Err(e)) => {
            error!("login lookup failed for {}: {:#}", req.username, e);
            return Json(Outcome::of(false));
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            return Json(Outcome::of(false));
        }
    };

    let field = match EncryptedField::from_hex(&row.password_data, &row.password_iv) {
        Ok(field) => field,
        Err(e) => {
            warn!("corrupt stored credential for {}: {}", req.username, e);
            return Json(Outcome::of(false));
        }
    };

    match state.cipher.decrypt(&field) {
        Ok(plaintext) => Json(Outcome::of(plaintext == req.password.as_bytes())),
        Err(e) => {
            warn!("credential decrypt failed for {}: {}", req.username, e);
            Json(Outcome::of(false))
        }
    }
}
