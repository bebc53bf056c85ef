use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::relations::MinShared;

/// Connection count at which a note counts as a hub.
///
/// Always at least 1, so a note with no connections can never be a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct HubThreshold(usize);

impl HubThreshold {
    pub const DEFAULT: Self = Self(5);

    /// Validates a hub threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for zero or negative values.
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::config::HubThreshold;
    ///
    /// assert_eq!(HubThreshold::new(3).unwrap().get(), 3);
    /// assert!(HubThreshold::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, EngineError> {
        usize::try_from(value)
            .ok()
            .filter(|&v| v > 0)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidConfig {
                key: "hub_threshold",
                value: value.to_string(),
            })
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for HubThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for HubThreshold {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HubThreshold> for i64 {
    fn from(value: HubThreshold) -> Self {
        value.0 as i64
    }
}

/// Thresholds and list sizes for the relationship engine.
///
/// Parsed from environment variables at call time with fallback defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shared keywords needed for two notes to be related (default 2).
    pub min_shared: MinShared,
    /// Connection count at which a note is a hub (default 5).
    pub hub_threshold: HubThreshold,
    /// Length of the most-connected list (default 5).
    pub most_connected_limit: usize,
    /// Length of the tag distribution (default 10).
    pub top_tags: usize,
    /// Length of the word frequency list (default 20).
    pub top_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_shared: MinShared::DEFAULT,
            hub_threshold: HubThreshold::DEFAULT,
            most_connected_limit: 5,
            top_tags: 10,
            top_words: 20,
        }
    }
}

impl EngineConfig {
    /// Parses configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `NOTEGRAPH_MIN_SHARED` (i64, default 2): Shared keywords needed for a relation
    /// - `NOTEGRAPH_HUB_THRESHOLD` (i64, default 5): Connections that make a hub
    /// - `NOTEGRAPH_MOST_CONNECTED` (usize, default 5): Most-connected list length
    /// - `NOTEGRAPH_TOP_TAGS` (usize, default 10): Tag distribution length
    /// - `NOTEGRAPH_TOP_WORDS` (usize, default 20): Word frequency length
    ///
    /// # Errors
    ///
    /// Values that parse but are out of range are rejected rather than
    /// replaced: a zero or negative `NOTEGRAPH_MIN_SHARED`, or a zero
    /// `NOTEGRAPH_HUB_THRESHOLD` (which would make isolated notes hubs).
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::EngineConfig;
    ///
    /// let config = EngineConfig::from_env().unwrap();
    /// assert_eq!(config.top_words, 20); // default when env var not set
    /// ```
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();

        let min_shared = match env_parse::<i64>("NOTEGRAPH_MIN_SHARED") {
            Some(value) => MinShared::new(value)?,
            None => defaults.min_shared,
        };

        let hub_threshold = match env_parse::<i64>("NOTEGRAPH_HUB_THRESHOLD") {
            Some(value) => HubThreshold::new(value)?,
            None => defaults.hub_threshold,
        };

        Ok(Self {
            min_shared,
            hub_threshold,
            most_connected_limit: env_parse("NOTEGRAPH_MOST_CONNECTED")
                .unwrap_or(defaults.most_connected_limit),
            top_tags: env_parse("NOTEGRAPH_TOP_TAGS").unwrap_or(defaults.top_tags),
            top_words: env_parse("NOTEGRAPH_TOP_WORDS").unwrap_or(defaults.top_words),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
