//! Environment-driven configuration

use std::str::FromStr;

use anyhow::{anyhow, Context};
use hanzi_core::{MatchingMode, MissingWeight};

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub packs: PackConfig,
    pub practice: PracticeConfig,
}

/// Pack-opening settings shared with request handlers.
#[derive(Debug, Clone, Copy)]
pub struct PackConfig {
    pub default_size: usize,
    pub max_size: usize,
    pub missing_weight: MissingWeight,
    /// Fixed seed for reproducible draws; entropy when unset.
    ///
    /// Every request is reseeded with the same value, so identical requests
    /// against an unchanged catalog draw identical packs. Demos and tests only.
    pub rng_seed: Option<u64>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            default_size: 5,
            max_size: 50,
            missing_weight: MissingWeight::One,
            rng_seed: None,
        }
    }
}

/// Settings for checking typed translation answers.
#[derive(Debug, Clone, Copy)]
pub struct PracticeConfig {
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::Fuzzy,
            fuzzy_threshold: 0.8,
        }
    }
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let pack_defaults = PackConfig::default();
        let packs = PackConfig {
            default_size: parse_or(&lookup, "DEFAULT_PACK_SIZE", pack_defaults.default_size)?,
            max_size: parse_or(&lookup, "MAX_PACK_SIZE", pack_defaults.max_size)?,
            missing_weight: parse_or(
                &lookup,
                "MISSING_FREQUENCY_WEIGHT",
                pack_defaults.missing_weight,
            )?,
            rng_seed: lookup("PACK_RNG_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("PACK_RNG_SEED must be an unsigned integer")?,
        };
        if packs.default_size == 0 || packs.default_size > packs.max_size {
            return Err(anyhow!(
                "DEFAULT_PACK_SIZE must be between 1 and MAX_PACK_SIZE ({})",
                packs.max_size
            ));
        }

        let practice_defaults = PracticeConfig::default();
        let practice = PracticeConfig {
            matching_mode: parse_or(&lookup, "MATCHING_MODE", practice_defaults.matching_mode)?,
            fuzzy_threshold: parse_or(
                &lookup,
                "FUZZY_THRESHOLD",
                practice_defaults.fuzzy_threshold,
            )?,
        };
        if !(0.0..=1.0).contains(&practice.fuzzy_threshold) {
            return Err(anyhow!("FUZZY_THRESHOLD must be within 0.0 and 1.0"));
        }

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            packs,
            practice,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}
