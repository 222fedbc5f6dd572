//! Counterfactual Regret Minimization (CFR) Solver.
//!
//! This module implements chance-sampled vanilla CFR: every iteration samples
//! the chance outcome (if the game has one) and then walks the whole player
//! tree below it, computing counterfactual values and updating regrets and
//! strategy sums at every information set it passes.
//!
//! The solver is generic over any game that implements the `Game` trait.
//!
//! Two weights matter at every decision node:
//! - regrets are scaled by the *counterfactual* reach probability, the product
//!   of every other player's reach probability;
//! - strategy sums are scaled by the *active* player's own reach probability.

use std::collections::BTreeMap;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, log_enabled, Level};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cfr::config::{CFRConfig, CFRStats};
use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{Action, Game, HistoryOf};
use crate::cfr::normal_form::format_probs;
use crate::cfr::player::Player;
use crate::cfr::storage::{RegretStorage, StorageExport};
use crate::cfr::strategy::sample_action;

/// A player trained by CFR.
///
/// Owns its regret table, strategy-sum table and instantaneous strategy.
#[derive(Debug, Clone, Default)]
pub struct CfrPlayer {
    name: String,
    storage: RegretStorage,
}

impl CfrPlayer {
    /// Create a player with empty tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage: RegretStorage::new(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's tables.
    pub fn storage(&self) -> &RegretStorage {
        &self.storage
    }

    /// Average strategy at every info set this player has visited.
    pub fn average_strategies(&self) -> BTreeMap<String, Vec<f64>> {
        self.storage.average_strategies()
    }
}

impl<G: Game> Player<G> for CfrPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&self, infostate: &str, rng: &mut dyn RngCore) -> Result<usize> {
        let n = <G::Action as Action>::ALL.len();
        Ok(sample_action(&self.storage.current_strategy(infostate, n), rng))
    }

    fn current_strategy(&self, infostate: &str) -> Option<Vec<f64>> {
        self.storage
            .contains(infostate)
            .then(|| self.storage.current_strategy(infostate, <G::Action as Action>::ALL.len()))
    }
}

/// The main CFR solver.
///
/// This struct owns the game and its players and runs self-play iterations.
/// The players' tables only accumulate, so calling [`CFRSolver::train`]
/// repeatedly continues the same run.
///
/// # Type Parameters
/// - `G`: The game type implementing the `Game` trait
///
/// # Example
/// ```ignore
/// use imperfect_cfr::cfr::{CFRConfig, CFRSolver};
/// use imperfect_cfr::games::kuhn::KuhnPoker;
///
/// let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default().with_seed(0));
///
/// // Train for 10,000 iterations
/// solver.train(10_000)?;
///
/// // Get the resulting strategy
/// let strategy = solver.average_strategy(0, "K");
/// ```
pub struct CFRSolver<G: Game> {
    /// The game being solved.
    game: G,

    /// One CFR player per seat.
    players: Vec<CfrPlayer>,

    /// Configuration for the solver.
    config: CFRConfig,

    /// Current iteration count.
    iteration: u64,

    /// Sum of root utilities over all iterations, per player.
    utility_sums: Vec<f64>,

    /// Statistics tracking.
    stats: CFRStats,

    /// Random number generator for chance sampling.
    rng: StdRng,
}

impl<G: Game> CFRSolver<G> {
    /// Create a solver with fresh players named `cfr0`, `cfr1`, ...
    pub fn new(game: G, config: CFRConfig) -> Self {
        let players = (0..game.num_players())
            .map(|i| CfrPlayer::new(format!("cfr{}", i)))
            .collect();
        Self::build(game, players, config)
    }

    /// Create a solver with the given players, one per seat.
    ///
    /// # Errors
    /// [`SolverError::PlayerCountMismatch`] if the count differs from the game's.
    pub fn with_players(game: G, players: Vec<CfrPlayer>, config: CFRConfig) -> Result<Self> {
        if players.len() != game.num_players() {
            return Err(SolverError::PlayerCountMismatch {
                expected: game.num_players(),
                got: players.len(),
            });
        }
        Ok(Self::build(game, players, config))
    }

    fn build(game: G, players: Vec<CfrPlayer>, config: CFRConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let n = players.len();

        Self {
            game,
            players,
            config,
            iteration: 0,
            utility_sums: vec![0.0; n],
            stats: CFRStats::new(),
            rng,
        }
    }

    /// Run a single iteration of CFR.
    ///
    /// # Returns
    /// The root utility of every player in this iteration.
    pub fn run_iteration(&mut self, frozen: &[usize]) -> Result<Vec<f64>> {
        self.iteration += 1;

        let history = self.game.initial_history(&mut self.rng);
        let reach_probs = vec![1.0; self.game.num_players()];
        let utils = self.cfr(&history, &reach_probs, frozen)?;

        for (sum, u) in self.utility_sums.iter_mut().zip(&utils) {
            *sum += u;
        }

        Ok(utils)
    }

    /// Train the solver for a specified number of iterations.
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, iterations: u64) -> Result<&CFRStats> {
        self.train_frozen(iterations, &[])
    }

    /// Train while leaving the tables of the players in `frozen` untouched.
    ///
    /// Frozen players still play their current strategy during traversal.
    pub fn train_frozen(&mut self, iterations: u64, frozen: &[usize]) -> Result<&CFRStats> {
        let start_time = Instant::now();
        let pb = self.progress_bar(iterations);

        debug!("iter | hist | reach_prob | active_player | infostate | regrets | policy");
        for _ in 0..iterations {
            if log_enabled!(Level::Debug) {
                debug!("{}", self.iteration + 1);
            }
            self.run_iteration(frozen)?;
            pb.inc(1);
        }
        pb.finish_and_clear();

        // Update stats
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.num_info_sets();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate(iterations);

        Ok(&self.stats)
    }

    /// Counterfactual regret minimization update step at `history`.
    ///
    /// `reach_probs[p]` is the probability that player `p`'s current strategy
    /// leads to `history`.
    ///
    /// # Returns
    /// The expected utility of this node for every player.
    fn cfr(
        &mut self,
        history: &HistoryOf<G>,
        reach_probs: &[f64],
        frozen: &[usize],
    ) -> Result<Vec<f64>> {
        if self.game.is_terminal(history) {
            return self.game.payoffs(history);
        }

        let max = self.game.max_history_len();
        if history.len() >= max {
            return Err(SolverError::DepthExceeded {
                depth: history.len(),
                max,
            });
        }

        let active = self.game.active_player(history)?;
        let infostate = self.game.infostate(history)?;
        let actions = self.game.actions();
        let num_actions = actions.len();
        let num_players = self.game.num_players();

        let learning = !frozen.contains(&active);
        let player = self.players.get_mut(active).ok_or_else(|| SolverError::InvalidHistory {
            history: self.game.history_to_string(history),
        })?;
        if learning {
            player.storage.ensure(&infostate, num_actions);
        }
        let cur_policy = player.storage.current_strategy(&infostate, num_actions);

        // counterfactual_values[p][a]: utility of player p after action a
        let mut counterfactual_values = vec![vec![0.0; num_actions]; num_players];
        for (a, &action) in actions.iter().enumerate() {
            let mut new_reach_probs = reach_probs.to_vec();
            new_reach_probs[active] *= cur_policy[a];

            let values = self.cfr(&history.child(action), &new_reach_probs, frozen)?;
            for (p, v) in values.into_iter().enumerate().take(num_players) {
                counterfactual_values[p][a] = v;
            }
        }

        let node_utils: Vec<f64> = counterfactual_values
            .iter()
            .map(|row| row.iter().zip(&cur_policy).map(|(v, s)| v * s).sum())
            .collect();

        let advantages: Vec<f64> = counterfactual_values[active]
            .iter()
            .map(|v| v - node_utils[active])
            .collect();

        if learning {
            // Only the other players' reach probabilities: the active player
            // is assumed to play to reach this infostate.
            let discount: f64 = reach_probs
                .iter()
                .enumerate()
                .filter(|&(p, _)| p != active)
                .map(|(_, &r)| r)
                .product();
            let regrets: Vec<f64> = advantages.iter().map(|a| a * discount).collect();

            let weight = if self.config.linear_averaging {
                reach_probs[active] * self.iteration as f64
            } else {
                reach_probs[active]
            };

            let storage = &mut self.players[active].storage;
            storage.update_regrets(&infostate, &regrets, self.config.cfr_plus);
            storage.update_strategy_sum(&infostate, &cur_policy, weight);
            // later visits in this traversal play the updated regrets
            storage.refresh(&infostate);
        }

        if log_enabled!(Level::Debug) {
            let hist = self.game.history_to_string(history);
            debug!(
                "       {:5}\t{:15} {}\t\t{:5}\t{:15}\t  {}",
                self.game.shorten_history(&hist),
                format_probs(reach_probs),
                self.players[active].name,
                self.game.shorten_history(&infostate),
                format_probs(&advantages),
                format_probs(&cur_policy)
            );
        }

        Ok(node_utils)
    }

    /// Average strategy of `player` at `infostate`.
    ///
    /// `None` for an unknown player or an infostate that was never visited.
    pub fn average_strategy(&self, player: usize, infostate: &str) -> Option<Vec<f64>> {
        let player = self.players.get(player)?;
        if !player.storage.contains(infostate) {
            return None;
        }
        Some(player.storage.average_strategy(infostate, self.game.actions().len()))
    }

    /// Average strategy of every player, infostate -> distribution.
    pub fn average_strategies(&self) -> Vec<BTreeMap<String, Vec<f64>>> {
        self.players.iter().map(CfrPlayer::average_strategies).collect()
    }

    /// Mean root utility per player over all iterations so far.
    pub fn average_utilities(&self) -> Vec<f64> {
        if self.iteration == 0 {
            return vec![0.0; self.utility_sums.len()];
        }
        self.utility_sums
            .iter()
            .map(|&u| u / self.iteration as f64)
            .collect()
    }

    /// Log the average policy and average regret of every info set, then the
    /// average utilities.
    pub fn log_summary(&self) {
        info!("info_set   |  avg_policy          |  avg_regrets");
        info!("{}", "-".repeat(64));
        let iterations = self.iteration.max(1) as f64;
        for player in &self.players {
            for infostate in player.storage.infostates() {
                let avg = player
                    .storage
                    .average_strategy(&infostate, self.game.actions().len());
                let avg_regrets: Vec<f64> = player
                    .storage
                    .regrets(&infostate)
                    .unwrap_or(&[])
                    .iter()
                    .map(|r| r / iterations)
                    .collect();
                info!(
                    "{:10} {:22} {}",
                    self.game.shorten_history(&infostate),
                    format_probs(&avg),
                    format_probs(&avg_regrets)
                );
            }
        }
        info!("{}", "-".repeat(64));
        info!(
            "Average utilities for {} over {} iters: {}",
            self.game.name(),
            self.iteration,
            format_probs(&self.average_utilities())
        );
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get the number of information sets discovered, over all players.
    pub fn num_info_sets(&self) -> usize {
        self.players.iter().map(|p| p.storage.num_info_sets()).sum()
    }

    /// Get current statistics.
    pub fn stats(&self) -> &CFRStats {
        &self.stats
    }

    /// The players, in seat order.
    pub fn players(&self) -> &[CfrPlayer] {
        &self.players
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &CFRConfig {
        &self.config
    }

    /// Export solver state for checkpointing.
    pub fn export_state(&self) -> SolverState {
        SolverState {
            iteration: self.iteration,
            utility_sums: self.utility_sums.clone(),
            players: self.players.iter().map(|p| p.storage.export()).collect(),
        }
    }

    /// Import solver state from checkpoint.
    ///
    /// # Errors
    /// [`SolverError::PlayerCountMismatch`] if the checkpoint has a different number of players.
    pub fn import_state(&mut self, state: SolverState) -> Result<()> {
        if state.players.len() != self.players.len() {
            return Err(SolverError::PlayerCountMismatch {
                expected: self.players.len(),
                got: state.players.len(),
            });
        }
        self.iteration = state.iteration;
        self.utility_sums = state.utility_sums;
        for (player, storage) in self.players.iter_mut().zip(state.players) {
            player.storage.import(storage);
        }
        Ok(())
    }

    fn progress_bar(&self, iterations: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(iterations);
        if let Ok(style) = ProgressStyle::with_template(
            "  CFR/{msg} [{bar:40}] {pos}/{len} iters [{elapsed} < {eta}, {per_sec}]",
        ) {
            pb.set_style(style);
        }
        pb.set_message(self.game.name());
        pb
    }
}

/// Serializable solver state for checkpointing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverState {
    /// Current iteration.
    pub iteration: u64,
    /// Sum of root utilities per player.
    pub utility_sums: Vec<f64>,
    /// Tables of every player, in seat order.
    pub players: Vec<StorageExport>,
}
