//! Configuration for the term index.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkiffError};

/// Default ceiling on the height of the skiplist.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Default probability that a node is promoted one more level.
pub const DEFAULT_PROMOTION_PROBABILITY: f64 = 0.5;

/// Configuration for [`TermSkipList`](crate::index::TermSkipList) construction.
///
/// # Examples
///
/// ```
/// use skiff::index::IndexConfig;
///
/// let config = IndexConfig::default().with_max_level(8).with_seed(7);
/// assert!(config.validate().is_ok());
///
/// let bad = IndexConfig::default().with_promotion_probability(1.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Highest level a node may be assigned. Level 0 always exists, so the
    /// head sentinel carries `max_level + 1` forward links.
    pub max_level: usize,

    /// Probability of promoting a node one level further, in (0, 1).
    pub promotion_probability: f64,

    /// Seed for level generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            max_level: DEFAULT_MAX_LEVEL,
            promotion_probability: DEFAULT_PROMOTION_PROBABILITY,
            seed: None,
        }
    }
}

impl IndexConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum level.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the promotion probability.
    pub fn with_promotion_probability(mut self, probability: f64) -> Self {
        self.promotion_probability = probability;
        self
    }

    /// Fix the level generation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.max_level < 1 {
            return Err(SkiffError::config(format!(
                "max_level must be >= 1, got {}",
                self.max_level
            )));
        }
        // Written so that NaN is rejected too.
        if !(self.promotion_probability > 0.0 && self.promotion_probability < 1.0) {
            return Err(SkiffError::config(format!(
                "promotion_probability must be in (0, 1), got {}",
                self.promotion_probability
            )));
        }
        Ok(())
    }
}
