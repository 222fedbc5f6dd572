//! Regret matching (Hart and Mas-Colell, 2000) for N-player normal-form games.
//!
//! The player keeps one cumulative regret vector over its actions. After each
//! game it asks what every one of its actions would have paid had everyone
//! else played exactly what they did, and adds the difference to what it
//! actually received.

use rand::RngCore;

use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{Action, Game, HistoryOf};
use crate::cfr::player::Player;
use crate::cfr::strategy::{regret_matching_strategy, sample_action};

/// Regret-matching player for simultaneous-move games.
#[derive(Debug, Clone)]
pub struct RegretMatchingPlayer {
    name: String,
    cum_regrets: Vec<f64>,
}

impl RegretMatchingPlayer {
    /// Create a player with zero regrets over `num_actions` actions.
    pub fn new(name: impl Into<String>, num_actions: usize) -> Self {
        Self {
            name: name.into(),
            cum_regrets: vec![0.0; num_actions],
        }
    }

    /// Cumulative regret per action.
    pub fn cum_regrets(&self) -> &[f64] {
        &self.cum_regrets
    }

    /// The regret-matching strategy derived from the cumulative regrets.
    pub fn strategy(&self) -> Vec<f64> {
        regret_matching_strategy(&self.cum_regrets)
    }

    /// Payoff this player would have received for each of its actions, all
    /// other players' realized actions held fixed.
    pub fn counterfactual_rewards<G: Game>(
        &self,
        game: &G,
        history: &HistoryOf<G>,
        player_id: usize,
    ) -> Result<Vec<f64>> {
        let actions = game.actions();
        let mut rewards = vec![0.0; actions.len()];

        for (i, &action) in actions.iter().enumerate() {
            let counterfactual = history.with_action_at(player_id, action).ok_or_else(|| {
                SolverError::InvalidHistory {
                    history: game.history_to_string(history),
                }
            })?;
            let payoffs = game.payoffs(&counterfactual)?;
            rewards[i] = *payoffs.get(player_id).ok_or_else(|| SolverError::InvalidHistory {
                history: game.history_to_string(&counterfactual),
            })?;
        }

        Ok(rewards)
    }
}

impl<G: Game> Player<G> for RegretMatchingPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&self, _infostate: &str, rng: &mut dyn RngCore) -> Result<usize> {
        Ok(sample_action(&self.strategy(), rng))
    }

    /// `cum_regrets += rewards - rewards[action taken]`.
    fn update_strategy(
        &mut self,
        game: &G,
        history: &HistoryOf<G>,
        player_id: usize,
    ) -> Result<()> {
        let n_actions = game.actions().len();
        if n_actions != self.cum_regrets.len() {
            return Err(SolverError::ActionCountMismatch {
                expected: n_actions,
                got: self.cum_regrets.len(),
            });
        }

        let taken = history
            .actions()
            .get(player_id)
            .map(Action::index)
            .ok_or_else(|| SolverError::InvalidHistory {
                history: game.history_to_string(history),
            })?;

        let rewards = self.counterfactual_rewards(game, history, player_id)?;
        let realized = *rewards.get(taken).ok_or(SolverError::ActionOutOfRange {
            action: taken,
            n_actions,
        })?;
        for (regret, reward) in self.cum_regrets.iter_mut().zip(&rewards) {
            *regret += reward - realized;
        }
        Ok(())
    }

    fn current_strategy(&self, _infostate: &str) -> Option<Vec<f64>> {
        Some(self.strategy())
    }
}
