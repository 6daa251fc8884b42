//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from hanzi-core
pub use hanzi_core::{
    HskLevel, LevelProgress, MatchResult, MatchingMode, PinyinMatch, PoolScope, WordRecord,
};

// === Database Entity Types ===

/// Learner known to the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub identity_subject: String,
    pub token: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Catalog word stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: i64,
    pub chinese: String,
    pub pinyin: String,
    pub translation: String,
    pub hsk_level: Option<i16>,
    pub frequency: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbWord {
    /// Convert to the core catalog record
    pub fn to_word_record(&self) -> WordRecord {
        WordRecord {
            id: self.id,
            chinese: self.chinese.clone(),
            pinyin: self.pinyin.clone(),
            translation: self.translation.clone(),
            hsk_level: self
                .hsk_level
                .and_then(|level| HskLevel::new(i64::from(level)).ok()),
            frequency: self.frequency,
        }
    }
}

/// Unlocked card joined with its word
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUnlockedCard {
    pub word_id: i64,
    pub chinese: String,
    pub pinyin: String,
    pub translation: String,
    pub hsk_level: Option<i16>,
    pub frequency: Option<f64>,
    pub copies: i32,
    pub first_unlocked_at: DateTime<Utc>,
    pub last_unlocked_at: DateTime<Utc>,
}

impl DbUnlockedCard {
    pub fn to_api_card(&self) -> UnlockedCard {
        let word = WordRecord {
            id: self.word_id,
            chinese: self.chinese.clone(),
            pinyin: self.pinyin.clone(),
            translation: self.translation.clone(),
            hsk_level: self
                .hsk_level
                .and_then(|level| HskLevel::new(i64::from(level)).ok()),
            frequency: self.frequency,
        };
        UnlockedCard {
            word: WordView::from(word),
            copies: self.copies,
            first_unlocked_at: self.first_unlocked_at,
            last_unlocked_at: self.last_unlocked_at,
        }
    }
}

/// Pack opening history row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPackOpening {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_level: i16,
    pub requested_count: i32,
    pub pool_scope: String,
    pub word_ids: Vec<i64>,
    pub opened_at: DateTime<Utc>,
}

impl DbPackOpening {
    pub fn to_api_entry(&self) -> PackHistoryEntry {
        PackHistoryEntry {
            pack_id: self.id,
            target_level: self.target_level,
            requested_count: self.requested_count,
            pool_scope: self.pool_scope.parse().unwrap_or(PoolScope::Any),
            word_ids: self.word_ids.clone(),
            opened_at: self.opened_at,
        }
    }
}

/// Validated word ready to be written to the catalog
#[derive(Debug, Clone)]
pub struct WordUpsert {
    pub chinese: String,
    pub pinyin: String,
    pub translation: String,
    pub hsk_level: Option<HskLevel>,
    pub frequency: Option<f64>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub identity_subject: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

/// Word as shown to clients, with accented pinyin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordView {
    #[serde(flatten)]
    pub word: WordRecord,
    pub pinyin_display: String,
}

impl From<WordRecord> for WordView {
    fn from(word: WordRecord) -> Self {
        let pinyin_display = hanzi_core::to_accents(&word.pinyin);
        Self {
            word,
            pinyin_display,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WordsQuery {
    pub hsk_level: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<WordView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWord {
    pub chinese: String,
    pub pinyin: String,
    pub translation: String,
    pub hsk_level: Option<u8>,
    pub frequency: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertWordsRequest {
    pub words: Vec<NewWord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertWordsResponse {
    pub upserted: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenPackRequest {
    pub target_level: u8,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackCard {
    pub word: WordView,
    /// First time this user drew the word.
    pub is_new: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenPackResponse {
    pub pack_id: Uuid,
    pub target_level: HskLevel,
    pub requested_count: usize,
    pub pool_scope: PoolScope,
    pub shortfall: usize,
    /// Cards in draw order
    pub cards: Vec<PackCard>,
}

#[derive(Debug, Deserialize)]
pub struct PackHistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackHistoryEntry {
    pub pack_id: Uuid,
    pub target_level: i16,
    pub requested_count: i32,
    pub pool_scope: PoolScope,
    pub word_ids: Vec<i64>,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackHistoryResponse {
    pub packs: Vec<PackHistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnlockedCard {
    pub word: WordView,
    pub copies: i32,
    pub first_unlocked_at: DateTime<Utc>,
    pub last_unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<UnlockedCard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressRow {
    /// `None` for words without a known level
    pub level: Option<HskLevel>,
    pub owned: usize,
    pub total: usize,
    pub percent: f64,
}

impl From<&LevelProgress> for ProgressRow {
    fn from(progress: &LevelProgress) -> Self {
        Self {
            level: progress.level,
            owned: progress.owned,
            total: progress.total,
            percent: progress.percent(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub levels: Vec<ProgressRow>,
    pub owned_total: usize,
    pub catalog_total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeKind {
    Pinyin,
    Translation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeCheckRequest {
    pub word_id: i64,
    pub kind: PracticeKind,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeCheckResponse {
    pub word_id: i64,
    pub kind: PracticeKind,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<PinyinMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<MatchResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertPinyinRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertPinyinResponse {
    pub text: String,
    pub accented: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_word(hsk_level: Option<i16>) -> DbWord {
        DbWord {
            id: 7,
            chinese: "中国".to_string(),
            pinyin: "Zhong1guo2".to_string(),
            translation: "China".to_string(),
            hsk_level,
            frequency: Some(120.0),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_db_word_to_record() {
        let record = db_word(Some(2)).to_word_record();
        assert_eq!(record.id, 7);
        assert_eq!(record.hsk_level.map(HskLevel::value), Some(2));
        assert_eq!(record.frequency, Some(120.0));
    }

    #[test]
    fn test_db_word_unknown_level() {
        assert_eq!(db_word(None).to_word_record().hsk_level, None);
    }

    #[test]
    fn test_word_view_adds_accented_pinyin() {
        let view = WordView::from(db_word(Some(1)).to_word_record());
        assert_eq!(view.pinyin_display, "Zhōngguó");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["pinyin"], "Zhong1guo2");
        assert_eq!(json["pinyin_display"], "Zhōngguó");
        assert_eq!(json["hsk_level"], 1);
    }

    #[test]
    fn test_pack_opening_unknown_scope_falls_back() {
        let opening = DbPackOpening {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_level: 3,
            requested_count: 5,
            pool_scope: "mystery".to_string(),
            word_ids: vec![3, 1, 2],
            opened_at: Utc::now(),
        };
        let entry = opening.to_api_entry();
        assert_eq!(entry.pool_scope, PoolScope::Any);
        assert_eq!(entry.word_ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_progress_row_percent() {
        let row = ProgressRow::from(&LevelProgress {
            level: None,
            owned: 1,
            total: 4,
        });
        assert_eq!(row.percent, 25.0);
    }

    #[test]
    fn test_practice_kind_serde() {
        let request: PracticeCheckRequest =
            serde_json::from_str(r#"{"word_id":1,"kind":"pinyin","answer":"ni3"}"#).unwrap();
        assert_eq!(request.kind, PracticeKind::Pinyin);
    }
}
