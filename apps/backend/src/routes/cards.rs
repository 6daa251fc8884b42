//! Unlocked card endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/cards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<CardListResponse>> {
    let cards = state.db.get_unlocked_cards(auth.user_id).await?;
    Ok(Json(CardListResponse {
        cards: cards.iter().map(DbUnlockedCard::to_api_card).collect(),
    }))
}
