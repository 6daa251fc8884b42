//! Pack opening: catalog load, weighted draw, unlock persistence.

use chrono::Utc;
use hanzi_core::{open_pack, PackRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::config::PackConfig;
use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::*;

/// Validate a client request against the configured pack limits.
pub fn pack_request(config: &PackConfig, request: &OpenPackRequest) -> Result<PackRequest> {
    let target_level = HskLevel::try_from(request.target_level)?;
    let count = request.count.unwrap_or(config.default_size);
    if count > config.max_size {
        return Err(ApiError::BadRequest(format!(
            "pack size {} exceeds the maximum of {}",
            count, config.max_size
        )));
    }
    Ok(PackRequest::new(target_level, count)?)
}

/// Random source for one pack draw.
pub fn pack_rng(config: &PackConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw a pack for `user_id` and record it.
pub async fn open_pack_for_user(
    db: &Database,
    config: &PackConfig,
    user_id: Uuid,
    request: PackRequest,
) -> Result<OpenPackResponse> {
    let catalog: Vec<WordRecord> = db
        .get_words(None)
        .await?
        .iter()
        .map(DbWord::to_word_record)
        .collect();

    let mut rng = pack_rng(config);
    let pack = open_pack(&catalog, &request, config.missing_weight, &mut rng);

    if pack.shortfall > 0 {
        tracing::warn!(
            %user_id,
            level = request.target_level.value(),
            requested = request.count,
            pool_size = pack.pool_size,
            "not enough words to fill pack"
        );
    }

    let opening = DbPackOpening {
        id: Uuid::new_v4(),
        user_id,
        target_level: i16::from(request.target_level.value()),
        requested_count: i32::try_from(request.count)
            .map_err(|_| ApiError::BadRequest("pack size out of range".to_string()))?,
        pool_scope: pack.scope.as_str().to_string(),
        word_ids: pack.cards.iter().map(|w| w.id).collect(),
        opened_at: Utc::now(),
    };
    let copies = db.record_pack_opening(&opening).await?;

    tracing::info!(
        %user_id,
        pack_id = %opening.id,
        scope = pack.scope.as_str(),
        drawn = pack.cards.len(),
        "opened pack"
    );

    let cards = pack_cards(&pack.cards, &copies)?;

    Ok(OpenPackResponse {
        pack_id: opening.id,
        target_level: request.target_level,
        requested_count: request.count,
        pool_scope: pack.scope,
        shortfall: pack.shortfall,
        cards,
    })
}

/// Pair drawn words with their post-unlock copy counts.
fn pack_cards(words: &[&WordRecord], copies: &[i32]) -> Result<Vec<PackCard>> {
    if words.len() != copies.len() {
        return Err(ApiError::Internal(format!(
            "unlocked {} cards for a pack of {}",
            copies.len(),
            words.len()
        )));
    }

    Ok(words
        .iter()
        .zip(copies)
        .map(|(word, &copies)| PackCard {
            word: WordView::from((*word).clone()),
            is_new: copies == 1,
        })
        .collect())
}
