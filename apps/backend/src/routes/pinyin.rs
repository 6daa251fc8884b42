//! Pinyin conversion endpoint

use axum::Json;
use hanzi_core::to_accents;

use crate::models::{ConvertPinyinRequest, ConvertPinyinResponse};

/// POST /api/pinyin/convert
pub async fn convert(Json(payload): Json<ConvertPinyinRequest>) -> Json<ConvertPinyinResponse> {
    let accented = to_accents(&payload.text);
    Json(ConvertPinyinResponse {
        text: payload.text,
        accented,
    })
}
