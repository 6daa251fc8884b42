//! Practice answer checking

use axum::{extract::State, Extension, Json};
use hanzi_core::{compare_answers, compare_pinyin};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/practice/check
pub async fn check(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Json(payload): Json<PracticeCheckRequest>,
) -> Result<Json<PracticeCheckResponse>> {
    let word = state
        .db
        .get_word(payload.word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", payload.word_id)))?;

    let response = match payload.kind {
        PracticeKind::Pinyin => {
            let result = compare_pinyin(&payload.answer, &word.pinyin);
            PracticeCheckResponse {
                word_id: word.id,
                kind: payload.kind,
                is_correct: result.is_correct,
                pinyin: Some(result),
                translation: None,
            }
        }
        PracticeKind::Translation => {
            let result = compare_answers(
                &payload.answer,
                &word.translation,
                state.practice.matching_mode,
                state.practice.fuzzy_threshold,
            );
            PracticeCheckResponse {
                word_id: word.id,
                kind: payload.kind,
                is_correct: result.is_correct,
                pinyin: None,
                translation: Some(result),
            }
        }
    };

    Ok(Json(response))
}
