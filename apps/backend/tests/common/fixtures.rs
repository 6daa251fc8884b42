//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use hanzi_packs_backend::models::{HskLevel, WordUpsert};

/// Short random suffix to keep test rows apart.
pub fn unique_suffix() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Generate a unique identity-provider subject.
pub fn unique_subject() -> String {
    format!("test|{}", Uuid::new_v4())
}

/// Build `count` catalog words at `level`, unique to this test run.
pub fn words_at_level(level: u8, count: usize, frequency: Option<f64>) -> Vec<WordUpsert> {
    let suffix = unique_suffix();
    (0..count)
        .map(|i| WordUpsert {
            chinese: format!("测{}-{}-{}", level, i, suffix),
            pinyin: format!("ce4 shi4 {}", i),
            translation: format!("test word {}", i),
            hsk_level: Some(HskLevel::try_from(level).expect("valid level")),
            frequency,
        })
        .collect()
}

/// A single word with known pinyin and translation.
pub fn word(chinese: &str, pinyin: &str, translation: &str, level: u8) -> WordUpsert {
    WordUpsert {
        chinese: format!("{}{}", chinese, unique_suffix()),
        pinyin: pinyin.to_string(),
        translation: translation.to_string(),
        hsk_level: Some(HskLevel::try_from(level).expect("valid level")),
        frequency: Some(100.0),
    }
}

/// Create a register request body.
pub fn register_request(subject: &str, display_name: Option<&str>) -> serde_json::Value {
    match display_name {
        Some(n) => json!({ "identity_subject": subject, "display_name": n }),
        None => json!({ "identity_subject": subject }),
    }
}

/// Create an open pack request body.
pub fn open_pack_request(target_level: u8, count: Option<usize>) -> serde_json::Value {
    match count {
        Some(c) => json!({ "target_level": target_level, "count": c }),
        None => json!({ "target_level": target_level }),
    }
}

/// Create an upsert words request body.
pub fn upsert_words_request(words: &[serde_json::Value]) -> serde_json::Value {
    json!({ "words": words })
}

/// Create a practice check request body.
pub fn practice_request(word_id: i64, kind: &str, answer: &str) -> serde_json::Value {
    json!({ "word_id": word_id, "kind": kind, "answer": answer })
}
