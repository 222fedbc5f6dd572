//! Storage for CFR regrets and strategies.
//!
//! Every CFR player owns one `RegretStorage`. Entries are created lazily the
//! first time an infostate is visited and are only ever accumulated into,
//! never reset during a training run.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cfr::strategy::{regret_matching_strategy, uniform};

/// Per-infostate tables of one player.
///
/// This struct manages the core data structures used by CFR:
/// - **Regrets**: Cumulative counterfactual regret for each action at each info set
/// - **Strategy sums**: Cumulative reach-weighted strategy for computing the average strategy
/// - **Strategy**: The instantaneous regret-matching strategy played in the current iteration
#[derive(Debug, Clone, Default)]
pub struct RegretStorage {
    /// Cumulative regrets: infostate -> [regret per action]
    regrets: FxHashMap<String, Vec<f64>>,

    /// Cumulative strategy sums: infostate -> [strategy weight per action]
    strategy_sums: FxHashMap<String, Vec<f64>>,

    /// Instantaneous strategy: infostate -> [probability per action]
    strategy: FxHashMap<String, Vec<f64>>,
}

impl RegretStorage {
    /// Create new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate zeroed tables and a uniform strategy for an unseen infostate.
    pub fn ensure(&mut self, infostate: &str, num_actions: usize) {
        if !self.regrets.contains_key(infostate) {
            self.regrets
                .insert(infostate.to_string(), vec![0.0; num_actions]);
        }
        if !self.strategy_sums.contains_key(infostate) {
            self.strategy_sums
                .insert(infostate.to_string(), vec![0.0; num_actions]);
        }
        if !self.strategy.contains_key(infostate) {
            self.strategy
                .insert(infostate.to_string(), regret_matching_strategy(&self.regrets[infostate]));
        }
    }

    /// Get the instantaneous strategy for an info set.
    ///
    /// Unseen info sets play uniformly.
    pub fn current_strategy(&self, infostate: &str, num_actions: usize) -> Vec<f64> {
        match self.strategy.get(infostate) {
            Some(s) => s.clone(),
            None => uniform(num_actions),
        }
    }

    /// Get the average strategy for an info set (Nash equilibrium approximation).
    ///
    /// The average strategy is the normalized strategy sum; info sets that were
    /// never reached play uniformly.
    pub fn average_strategy(&self, infostate: &str, num_actions: usize) -> Vec<f64> {
        match self.strategy_sums.get(infostate) {
            Some(sums) => regret_matching_strategy(sums),
            None => uniform(num_actions),
        }
    }

    /// Average strategy at every visited info set, sorted by infostate.
    pub fn average_strategies(&self) -> BTreeMap<String, Vec<f64>> {
        self.strategy_sums
            .iter()
            .map(|(key, sums)| (key.clone(), regret_matching_strategy(sums)))
            .collect()
    }

    /// Add regret deltas to an info set.
    ///
    /// # Arguments
    /// * `infostate` - The information set key
    /// * `regret_updates` - Regret delta for each action
    /// * `floor_at_zero` - If true, floor cumulative regrets at 0 (CFR+)
    pub fn update_regrets(&mut self, infostate: &str, regret_updates: &[f64], floor_at_zero: bool) {
        let entry = self
            .regrets
            .entry(infostate.to_string())
            .or_insert_with(|| vec![0.0; regret_updates.len()]);

        debug_assert_eq!(
            entry.len(),
            regret_updates.len(),
            "Action count mismatch for info set {}",
            infostate
        );

        for (r, &update) in entry.iter_mut().zip(regret_updates) {
            *r += update;
            if floor_at_zero && *r < 0.0 {
                *r = 0.0;
            }
        }
    }

    /// Add a weighted strategy to an info set's strategy sum.
    ///
    /// # Arguments
    /// * `infostate` - The information set key
    /// * `strategy` - Strategy played at this visit
    /// * `weight` - The player's own reach probability (times the iteration for linear averaging)
    pub fn update_strategy_sum(&mut self, infostate: &str, strategy: &[f64], weight: f64) {
        let entry = self
            .strategy_sums
            .entry(infostate.to_string())
            .or_insert_with(|| vec![0.0; strategy.len()]);

        for (s, &prob) in entry.iter_mut().zip(strategy) {
            *s += prob * weight;
        }
    }

    /// Recompute the instantaneous strategy of one info set from its regrets.
    ///
    /// Does nothing for an info set that has no regrets yet.
    pub fn refresh(&mut self, infostate: &str) {
        if let Some(regrets) = self.regrets.get(infostate) {
            self.strategy
                .insert(infostate.to_string(), regret_matching_strategy(regrets));
        }
    }

    /// Recompute the instantaneous strategy of every info set from its regrets.
    pub fn refresh_strategies(&mut self) {
        for (key, regrets) in &self.regrets {
            self.strategy
                .insert(key.clone(), regret_matching_strategy(regrets));
        }
    }

    /// Get the number of information sets stored.
    pub fn num_info_sets(&self) -> usize {
        self.regrets.len()
    }

    /// Check if an info set exists in storage.
    pub fn contains(&self, infostate: &str) -> bool {
        self.regrets.contains_key(infostate)
    }

    /// Cumulative regrets of an info set.
    pub fn regrets(&self, infostate: &str) -> Option<&[f64]> {
        self.regrets.get(infostate).map(Vec::as_slice)
    }

    /// Strategy sum of an info set.
    pub fn strategy_sum(&self, infostate: &str) -> Option<&[f64]> {
        self.strategy_sums.get(infostate).map(Vec::as_slice)
    }

    /// All info set keys, sorted.
    pub fn infostates(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.regrets.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Export storage to serializable format.
    pub fn export(&self) -> StorageExport {
        StorageExport {
            regrets: self.regrets.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            strategy_sums: self
                .strategy_sums
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Import storage from serialized format.
    ///
    /// The instantaneous strategies are rebuilt from the imported regrets.
    pub fn import(&mut self, data: StorageExport) {
        self.regrets = data.regrets.into_iter().collect();
        self.strategy_sums = data.strategy_sums.into_iter().collect();
        self.strategy.clear();
        self.refresh_strategies();
    }
}

/// Serializable export format for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageExport {
    /// Cumulative regrets
    pub regrets: BTreeMap<String, Vec<f64>>,
    /// Cumulative strategy sums
    pub strategy_sums: BTreeMap<String, Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_info_set_is_uniform() {
        let storage = RegretStorage::new();
        assert_eq!(storage.current_strategy("K", 2), vec![0.5, 0.5]);
        assert_eq!(storage.average_strategy("K", 2), vec![0.5, 0.5]);
        assert!(!storage.contains("K"));
    }

    #[test]
    fn test_ensure_is_lazy_and_idempotent() {
        let mut storage = RegretStorage::new();
        storage.ensure("P0", 3);
        storage.update_regrets("P0", &[1.0, 0.0, 0.0], false);
        storage.ensure("P0", 3);

        assert_eq!(storage.num_info_sets(), 1);
        assert_eq!(storage.regrets("P0"), Some(&[1.0, 0.0, 0.0][..]));
        assert_eq!(storage.strategy_sum("P0"), Some(&[0.0, 0.0, 0.0][..]));
    }

    #[test]
    fn test_strategy_only_changes_on_refresh() {
        let mut storage = RegretStorage::new();
        storage.ensure("P0", 2);
        storage.update_regrets("P0", &[3.0, 1.0], false);
        assert_eq!(storage.current_strategy("P0", 2), vec![0.5, 0.5]);

        storage.refresh_strategies();
        assert_eq!(storage.current_strategy("P0", 2), vec![0.75, 0.25]);
    }

    #[test]
    fn test_refresh_single_info_set() {
        let mut storage = RegretStorage::new();
        storage.ensure("P0", 2);
        storage.ensure("P1", 2);
        storage.update_regrets("P0", &[1.0, 3.0], false);
        storage.update_regrets("P1", &[2.0, 0.0], false);

        storage.refresh("P0");
        assert_eq!(storage.current_strategy("P0", 2), vec![0.25, 0.75]);
        // other info sets keep their old strategy
        assert_eq!(storage.current_strategy("P1", 2), vec![0.5, 0.5]);

        storage.refresh("missing");
        assert!(!storage.contains("missing"));
    }

    #[test]
    fn test_cfr_plus_floor() {
        let mut storage = RegretStorage::new();
        storage.update_regrets("P0", &[-2.0, 1.0], true);
        assert_eq!(storage.regrets("P0"), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_average_strategy_normalizes_sums() {
        let mut storage = RegretStorage::new();
        storage.update_strategy_sum("P0", &[0.5, 0.5], 1.0);
        storage.update_strategy_sum("P0", &[1.0, 0.0], 2.0);
        let avg = storage.average_strategy("P0", 2);
        assert!((avg[0] - 2.5 / 3.0).abs() < 1e-12);
        assert!((avg[1] - 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_export_import() {
        let mut storage = RegretStorage::new();
        storage.update_regrets("J", &[1.0, -1.0], false);
        storage.update_strategy_sum("J", &[0.25, 0.75], 1.0);

        let exported = storage.export();
        let json = serde_json::to_string(&exported).unwrap();
        let decoded: StorageExport = serde_json::from_str(&json).unwrap();

        let mut restored = RegretStorage::new();
        restored.import(decoded);
        assert_eq!(restored.export(), exported);
        assert_eq!(restored.current_strategy("J", 2), vec![1.0, 0.0]);
    }
}
