//! Game implementations for the trainers.
//!
//! These serve as:
//!
//! 1. **Validation**: Games with known Nash equilibria (like Kuhn Poker) verify
//!    that the CFR implementation is correct.
//!
//! 2. **Examples**: Demonstrate how to implement the `Game` and `NormalFormGame`
//!    traits for new games.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker - A simplified 3-card poker game with known Nash equilibrium
//! - [`rock_paper_scissor`]: Rock-paper-scissor and an asymmetric variant
//! - [`prisoner_dilemma`]: The two-player Prisoner's Dilemma
//! - [`bar_crowding`]: A three-player El Farol bar game
//!
//! ## Adding New Games
//!
//! Simultaneous-move games only need `NormalFormGame`: an action enum and a
//! payoff table. Sequential games implement `Game` directly; see the [`kuhn`]
//! module for a complete example with a chance deal.

pub mod bar_crowding;
pub mod kuhn;
pub mod prisoner_dilemma;
pub mod rock_paper_scissor;
