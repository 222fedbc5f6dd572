//! Configuration options for the trainers.
//!
//! The defaults give the plain algorithms: vanilla CFR with uniform
//! averaging and regret matching without any schedule.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cfr::error::Result;

/// Configuration for the CFR solver.
///
/// # Example
/// ```
/// use imperfect_cfr::cfr::CFRConfig;
///
/// let config = CFRConfig::default().with_seed(7);
/// assert!(!config.cfr_plus); // vanilla CFR by default
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CFRConfig {
    /// Floor cumulative regrets at zero after every update (CFR+).
    pub cfr_plus: bool,

    /// Weight strategy-sum contributions by the iteration number.
    ///
    /// Later iterations count more when computing the average strategy.
    pub linear_averaging: bool,

    /// Random seed for chance sampling.
    ///
    /// If `None`, the generator is seeded from entropy.
    pub seed: Option<u64>,

    /// Show a progress bar while training.
    pub show_progress: bool,
}

impl CFRConfig {
    /// Create a new CFRConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Builder method: set whether to use CFR+.
    pub fn with_cfr_plus(mut self, enable: bool) -> Self {
        self.cfr_plus = enable;
        self
    }

    /// Builder method: set whether to use linear averaging.
    pub fn with_linear_averaging(mut self, enable: bool) -> Self {
        self.linear_averaging = enable;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: show a progress bar.
    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }
}

/// Configuration for the normal-form regret-matching trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalFormConfig {
    /// Random seed for action sampling.
    pub seed: Option<u64>,

    /// Show a progress bar while training.
    pub show_progress: bool,
}

impl NormalFormConfig {
    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: show a progress bar.
    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }
}

/// Statistics tracked during CFR training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CFRStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered (over all players).
    pub info_sets: usize,

    /// Time spent in the last `train` call (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second of the last `train` call.
    pub iterations_per_second: f64,
}

impl CFRStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second for a call that ran `iterations` iterations.
    pub fn update_rate(&mut self, iterations: u64) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = iterations as f64 / self.elapsed_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CFRConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(config, CFRConfig::default().with_seed(3));
    }

    #[test]
    fn test_builders() {
        let config = CFRConfig::new()
            .with_cfr_plus(true)
            .with_linear_averaging(true)
            .with_progress(true);
        assert!(config.cfr_plus && config.linear_averaging && config.show_progress);
        assert_eq!(config.seed, None);
    }
}
