//! Ownership progress endpoint

use std::collections::HashSet;

use axum::{extract::State, Extension, Json};
use hanzi_core::level_progress;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/progress
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ProgressResponse>> {
    let catalog: Vec<WordRecord> = state
        .db
        .get_words(None)
        .await?
        .iter()
        .map(DbWord::to_word_record)
        .collect();
    let owned: HashSet<i64> = state
        .db
        .get_unlocked_word_ids(auth.user_id)
        .await?
        .into_iter()
        .collect();

    let levels = level_progress(&catalog, &owned);
    let owned_total = levels.iter().map(|row| row.owned).sum();

    Ok(Json(ProgressResponse {
        levels: levels.iter().map(ProgressRow::from).collect(),
        owned_total,
        catalog_total: catalog.len(),
    }))
}
