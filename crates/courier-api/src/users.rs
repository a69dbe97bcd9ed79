use axum::{Json, extract::State};
use tracing::error;

use courier_types::api::{DirectoryEntry, GetUsersRequest};

use crate::auth::AppState;

/// List every known account except the requester, in storage retrieval
/// order. The exclusion matches on the username string only.
pub async fn get_users(
    State(state): State<AppState>,
    Json(req): Json<GetUsersRequest>,
) -> Json<Vec<DirectoryEntry>> {
    let db = state.clone();
    let result = tokio::task::spawn_blocking(move || db.db.list_users()).await;

    let rows = match result {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => {
            error!("get-users query failed: {:#}", e);
            return Json(vec![]);
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            return Json(vec![]);
        }
    };

    let entries = rows
        .into_iter()
        .filter(|row| row.username != req.username)
        .map(|row| DirectoryEntry {
            id: row.id,
            username: row.username,
        })
        .collect();

    Json(entries)
}
