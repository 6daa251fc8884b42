//! Pack endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::packs::{open_pack_for_user, pack_request};
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

/// POST /api/packs/open
pub async fn open(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<OpenPackRequest>,
) -> Result<Json<OpenPackResponse>> {
    let request = pack_request(&state.packs, &payload)?;
    let response = open_pack_for_user(&state.db, &state.packs, auth.user_id, request).await?;
    Ok(Json(response))
}

/// GET /api/packs/history
pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<PackHistoryQuery>,
) -> Result<Json<PackHistoryResponse>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let openings = state.db.get_pack_history(auth.user_id, limit).await?;

    Ok(Json(PackHistoryResponse {
        packs: openings.iter().map(DbPackOpening::to_api_entry).collect(),
    }))
}
