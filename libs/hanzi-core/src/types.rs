//! Core types for the vocabulary pack application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// HSK difficulty level, always within 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HskLevel(u8);

impl HskLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Create a level, rejecting anything outside 1-6.
    pub fn new(level: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(CoreError::InvalidHskLevel(level))
        }
    }

    /// All six levels in ascending order.
    pub fn all() -> impl Iterator<Item = HskLevel> {
        (Self::MIN..=Self::MAX).map(HskLevel)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether `other` is at most one level away from this one.
    pub fn is_adjacent_to(self, other: HskLevel) -> bool {
        self.0.abs_diff(other.0) <= 1
    }
}

impl TryFrom<u8> for HskLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(i64::from(value))
    }
}

impl From<HskLevel> for u8 {
    fn from(level: HskLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSK {}", self.0)
    }
}

/// Catalog entry. Read-only to the sampler and the transducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: i64,
    pub chinese: String,
    pub pinyin: String,
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsk_level: Option<HskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl WordRecord {
    /// Sampling weight under the given policy for absent or non-finite
    /// frequencies. Negative frequencies pass through; the sampler treats
    /// them as zero.
    pub fn weight(&self, missing: MissingWeight) -> f64 {
        match self.frequency {
            Some(f) if f.is_finite() => f,
            _ => missing.value(),
        }
    }
}

/// Weight assigned to words whose frequency is absent or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingWeight {
    /// Never drawn while any weighted candidate remains.
    Zero,
    /// Treated like a word seen once.
    #[default]
    One,
}

impl MissingWeight {
    pub fn value(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::One => 1.0,
        }
    }
}

impl FromStr for MissingWeight {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "zero" | "0" => Ok(Self::Zero),
            "one" | "1" => Ok(Self::One),
            other => Err(format!("unknown missing-weight policy: {}", other)),
        }
    }
}

/// A single pack-opening request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRequest {
    pub target_level: HskLevel,
    pub count: usize,
}

impl PackRequest {
    pub fn new(target_level: HskLevel, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(CoreError::InvalidPackSize(count));
        }
        Ok(Self {
            target_level,
            count,
        })
    }
}

/// How far the fallback cascade had to widen to fill a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolScope {
    /// Only words at the target level.
    Exact,
    /// Words within one level of the target.
    Adjacent,
    /// The whole catalog, including unleveled words.
    Any,
}

impl PoolScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Adjacent => "adjacent",
            Self::Any => "any",
        }
    }
}

impl FromStr for PoolScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "adjacent" => Ok(Self::Adjacent),
            "any" => Ok(Self::Any),
            other => Err(format!("unknown pool scope: {}", other)),
        }
    }
}

/// Matching mode for typed translation answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    #[default]
    Fuzzy,
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl FromStr for MatchingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact" => Ok(Self::Exact),
            "case_insensitive" => Ok(Self::CaseInsensitive),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(CoreError::UnknownMatchingMode(other.to_string())),
        }
    }
}
