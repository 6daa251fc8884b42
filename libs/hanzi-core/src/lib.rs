//! Core vocabulary-pack library used by the backend.
//!
//! Provides:
//! - Pinyin tone-number to diacritic conversion
//! - Weighted sampling without replacement for pack contents
//! - HSK-level fallback cascade for building pack candidate pools
//! - Per-level ownership progress
//! - Answer matching for practice exercises
//! - Shared types (WordRecord, HskLevel, PackRequest, etc.)

pub mod error;
pub mod matching;
pub mod pack;
pub mod pinyin;
pub mod progress;
pub mod sampler;
pub mod types;

pub use error::{CoreError, Result};
pub use matching::{
    compare_answers, compare_pinyin, levenshtein_distance, normalized_similarity, MatchResult,
    PinyinMatch,
};
pub use pack::{candidate_pool, open_pack, Pack};
pub use pinyin::{strip_tone_marks, to_accents};
pub use progress::{level_progress, LevelProgress};
pub use sampler::sample;
pub use types::{HskLevel, MatchingMode, MissingWeight, PackRequest, PoolScope, WordRecord};
