//! Word catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/words
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<WordsQuery>,
) -> Result<Json<WordListResponse>> {
    let level = query.hsk_level.map(HskLevel::try_from).transpose()?;
    let words = state.db.get_words(level).await?;

    Ok(Json(WordListResponse {
        words: words
            .iter()
            .map(|w| WordView::from(w.to_word_record()))
            .collect(),
    }))
}

/// GET /api/words/:id
pub async fn get(
    State(state): State<AppState>,
    Path(word_id): Path<i64>,
) -> Result<Json<WordView>> {
    let word = state
        .db
        .get_word(word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", word_id)))?;

    Ok(Json(WordView::from(word.to_word_record())))
}

/// POST /api/words
pub async fn upsert(
    State(state): State<AppState>,
    Json(payload): Json<UpsertWordsRequest>,
) -> Result<Json<UpsertWordsResponse>> {
    let words = payload
        .words
        .into_iter()
        .map(validate_word)
        .collect::<Result<Vec<_>>>()?;

    let upserted = state.db.upsert_words(&words).await?;
    tracing::info!("Upserted {} catalog words", upserted);

    Ok(Json(UpsertWordsResponse { upserted }))
}

fn validate_word(word: NewWord) -> Result<WordUpsert> {
    let chinese = word.chinese.trim().to_string();
    let pinyin = word.pinyin.trim().to_string();
    if chinese.is_empty() || pinyin.is_empty() {
        return Err(ApiError::BadRequest(
            "chinese and pinyin are required".to_string(),
        ));
    }
    if let Some(f) = word.frequency {
        if !f.is_finite() || f < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "invalid frequency {} for {}",
                f, chinese
            )));
        }
    }

    Ok(WordUpsert {
        hsk_level: word.hsk_level.map(HskLevel::try_from).transpose()?,
        translation: word.translation.trim().to_string(),
        frequency: word.frequency,
        chinese,
        pinyin,
    })
}
