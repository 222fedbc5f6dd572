//! # Imperfect CFR
//!
//! Regret matching and Counterfactual Regret Minimization (CFR) for small
//! games with hidden information.
//!
//! ## Features
//!
//! - **Generic Game Contract**: Works with any game implementing the `Game` trait
//! - **Regret Matching**: Self-play for simultaneous-move games, with freeze lists
//! - **Vanilla CFR**: Full-tree traversal with optional CFR+ and linear averaging
//! - **Checkpointing**: Save and resume solver state
//! - **Evaluation**: Exact and Monte-Carlo payoffs of a strategy profile
//!
//! ## Quick Start
//!
//! ```ignore
//! use imperfect_cfr::{CFRConfig, CFRSolver};
//! use imperfect_cfr::games::kuhn::KuhnPoker;
//!
//! let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default());
//! solver.train(100_000)?;
//!
//! // close to -1/18 for the first player
//! println!("{:?}", solver.average_utilities());
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Game contract, players and both trainers
//! - [`games`]: Game implementations (Kuhn Poker, rock-paper-scissor, etc.)

#![warn(missing_docs)]

/// Regret-minimization module.
///
/// This is the core module containing the game contract and the trainers.
pub mod cfr;

/// Game implementations module.
///
/// Contains small games used for testing and demos.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{
    Action, CFRConfig, CFRSolver, CFRStats, Game, NormalFormConfig, NormalFormGame,
    NormalFormTrainer, Player, SolverError,
};
