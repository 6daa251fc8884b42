//! Per-level ownership progress.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{HskLevel, WordRecord};

/// Owned and total word counts for one HSK level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// `None` groups words with no known level.
    pub level: Option<HskLevel>,
    pub owned: usize,
    pub total: usize,
}

impl LevelProgress {
    /// Owned share in percent, 0 for an empty level.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.owned as f64 * 100.0 / self.total as f64
    }
}

/// Count owned words per level.
///
/// Always returns levels 1-6 in order. An extra unknown-level row is added
/// only when the catalog has unleveled words. Owned ids missing from the
/// catalog are ignored.
pub fn level_progress(catalog: &[WordRecord], owned: &HashSet<i64>) -> Vec<LevelProgress> {
    let mut rows: Vec<LevelProgress> = HskLevel::all()
        .map(|level| LevelProgress {
            level: Some(level),
            owned: 0,
            total: 0,
        })
        .collect();
    let mut unknown = LevelProgress {
        level: None,
        owned: 0,
        total: 0,
    };

    for word in catalog {
        let row = match word.hsk_level {
            Some(level) => &mut rows[usize::from(level.value() - HskLevel::MIN)],
            None => &mut unknown,
        };
        row.total += 1;
        if owned.contains(&word.id) {
            row.owned += 1;
        }
    }

    if unknown.total > 0 {
        rows.push(unknown);
    }
    rows
}
