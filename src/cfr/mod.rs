//! Regret-minimization trainers.
//!
//! This module provides the game and player contracts and two self-play
//! trainers built on the same regret-matching rule:
//!
//! - [`NormalFormTrainer`] plays simultaneous-move games and lets each
//!   [`RegretMatchingPlayer`] update its regrets from realized and
//!   counterfactual payoffs.
//! - [`CFRSolver`] runs Counterfactual Regret Minimization on extensive-form
//!   games with private information and chance events.
//!
//! # Usage
//!
//! To use the CFR solver with your game:
//!
//! 1. Implement the `Game` trait (or `NormalFormGame` for simultaneous games)
//! 2. Create a `CFRSolver` with your game and configuration
//! 3. Call `train()` to run iterations
//! 4. Extract strategies using `average_strategies()`
//!
//! # Example
//!
//! ```ignore
//! use imperfect_cfr::cfr::{CFRConfig, CFRSolver};
//! use imperfect_cfr::games::kuhn::KuhnPoker;
//!
//! let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default().with_seed(0));
//!
//! let stats = solver.train(100_000)?;
//! println!("Trained {} info sets in {:.2}s", stats.info_sets, stats.elapsed_seconds);
//!
//! // Player 0 holding a king
//! println!("{:?}", solver.average_strategy(0, "K"));
//! ```
//!
//! # Theory
//!
//! **Regret**: The difference between the value of an action and the value of the current strategy.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: Set strategy proportional to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! **Convergence**: Average regret decreases as O(1/sqrt(T)), and the average strategy
//! converges to Nash equilibrium in two-player zero-sum games.
//!
//! # References
//!
//! - Hart, S., Mas-Colell, A. "A Simple Adaptive Procedure Leading to Correlated Equilibrium" (2000)
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+" (2014)

pub mod config;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod normal_form;
pub mod output;
pub mod player;
pub mod regret_matching;
pub mod solver;
pub mod storage;
pub mod strategy;

// Re-export main types for convenient access
pub use config::{CFRConfig, CFRStats, NormalFormConfig};
pub use error::{Result, SolverError};
pub use evaluate::{evaluate_strategies, expected_payoffs, StrategyMap};
pub use game::{play, Action, Game, History, HistoryOf, NoChance, NormalFormGame};
pub use normal_form::NormalFormTrainer;
pub use output::{PlayerReport, StrategyReport};
pub use player::{FixedPolicyPlayer, Player};
pub use regret_matching::RegretMatchingPlayer;
pub use solver::{CFRSolver, CfrPlayer, SolverState};
pub use storage::{RegretStorage, StorageExport};
pub use strategy::{regret_matching_strategy, sample_action, uniform};
