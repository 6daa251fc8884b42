//! Answer matching for practice exercises.

use serde::{Deserialize, Serialize};

use crate::pinyin::{strip_tone_marks, to_accents};
use crate::types::MatchingMode;

/// Result of comparing a typed translation to the expected one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    pub matching_mode: MatchingMode,
    pub typed_normalized: String,
    pub correct_normalized: String,
}

/// Result of comparing typed pinyin to a word's pinyin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinyinMatch {
    /// Letters and tones both match.
    pub is_correct: bool,
    /// Letters match once tone marks are ignored.
    pub letters_correct: bool,
    pub typed_display: String,
    pub expected_display: String,
}

/// Compare a typed translation to the correct answer.
pub fn compare_answers(
    typed: &str,
    correct: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    let typed_normalized = normalize_whitespace(typed);
    let correct_normalized = normalize_whitespace(correct);

    let similarity = match mode {
        MatchingMode::Exact => exact_score(typed_normalized == correct_normalized),
        MatchingMode::CaseInsensitive => exact_score(
            typed_normalized.to_lowercase() == correct_normalized.to_lowercase(),
        ),
        MatchingMode::Fuzzy => normalized_similarity(
            &typed_normalized.to_lowercase(),
            &correct_normalized.to_lowercase(),
        ),
    };
    let is_correct = match mode {
        MatchingMode::Fuzzy => similarity >= fuzzy_threshold,
        _ => similarity == 1.0,
    };

    MatchResult {
        is_correct,
        similarity,
        matching_mode: mode,
        typed_normalized,
        correct_normalized,
    }
}

/// Compare typed pinyin to the expected pinyin.
///
/// Either side may use tone numbers or diacritics. Case and spacing are
/// ignored, so `Ni3hao3` matches `nǐ hǎo`.
pub fn compare_pinyin(typed: &str, expected: &str) -> PinyinMatch {
    let typed_display = normalize_whitespace(&to_accents(typed));
    let expected_display = normalize_whitespace(&to_accents(expected));

    let typed_key = pinyin_key(&typed_display);
    let expected_key = pinyin_key(&expected_display);

    PinyinMatch {
        is_correct: typed_key == expected_key,
        letters_correct: strip_tone_marks(&typed_key) == strip_tone_marks(&expected_key),
        typed_display,
        expected_display,
    }
}

fn exact_score(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}

fn pinyin_key(display: &str) -> String {
    display
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trim and collapse runs of whitespace.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Levenshtein distance over chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // row[j] holds the distance between the current prefix of `a` and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ca != cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Similarity in 0.0..=1.0 derived from the Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("nǐ hǎo", "ni hao"), 2);
    }

    #[test]
    fn test_normalized_similarity() {
        assert_eq!(normalized_similarity("abc", "abc"), 1.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert!(normalized_similarity("kitten", "sitting") > 0.5);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn test_compare_exact() {
        let result = compare_answers("hello", "hello", MatchingMode::Exact, 0.8);
        assert!(result.is_correct);
        assert_eq!(result.similarity, 1.0);

        let result = compare_answers("Hello", "hello", MatchingMode::Exact, 0.8);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_compare_case_insensitive() {
        let result = compare_answers("To Eat", "to eat", MatchingMode::CaseInsensitive, 0.8);
        assert!(result.is_correct);
    }

    #[test]
    fn test_compare_fuzzy() {
        let result = compare_answers("helo", "hello", MatchingMode::Fuzzy, 0.8);
        assert!(result.is_correct);

        let result = compare_answers("water", "hello", MatchingMode::Fuzzy, 0.8);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_whitespace_normalization() {
        let result = compare_answers("  to   drink  ", "to drink", MatchingMode::Exact, 0.8);
        assert!(result.is_correct);
        assert_eq!(result.typed_normalized, "to drink");
    }

    #[test]
    fn pinyin_numbers_match_diacritics() {
        let result = compare_pinyin("ni3 hao3", "nǐ hǎo");
        assert!(result.is_correct);
        assert_eq!(result.typed_display, "nǐ hǎo");
    }

    #[test]
    fn pinyin_ignores_case_and_spacing() {
        assert!(compare_pinyin("Ni3hao3", "ni3 hao3").is_correct);
        assert!(compare_pinyin("xi1 an1", "Xi1'an1").is_correct);
    }

    #[test]
    fn pinyin_wrong_tone_keeps_letters() {
        let result = compare_pinyin("ni2 hao3", "ni3 hao3");
        assert!(!result.is_correct);
        assert!(result.letters_correct);
    }

    #[test]
    fn pinyin_umlaut_spellings() {
        assert!(compare_pinyin("lv4", "lü4").is_correct);
        assert!(!compare_pinyin("lu4", "lü4").letters_correct);
    }
}
