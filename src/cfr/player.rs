//! The player contract and a fixed-policy player.

use rand::RngCore;
use rustc_hash::FxHashMap;

use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{Game, HistoryOf};
use crate::cfr::strategy::sample_action;

/// A participant of a game.
///
/// Players never hold a reference to the game; whatever needs the game (the
/// end-of-game update) receives it as an argument.
pub trait Player<G: Game> {
    /// Display name.
    fn name(&self) -> &str;

    /// Choose an action index at `infostate`.
    fn act(&self, infostate: &str, rng: &mut dyn RngCore) -> Result<usize>;

    /// Learn from a finished game. `history` must be terminal and
    /// `player_id` is this player's seat.
    fn update_strategy(
        &mut self,
        _game: &G,
        _history: &HistoryOf<G>,
        _player_id: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// The distribution this player currently plays at `infostate`, if it has one.
    fn current_strategy(&self, _infostate: &str) -> Option<Vec<f64>> {
        None
    }
}

impl<G: Game, P: Player<G> + ?Sized> Player<G> for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn act(&self, infostate: &str, rng: &mut dyn RngCore) -> Result<usize> {
        (**self).act(infostate, rng)
    }

    fn update_strategy(
        &mut self,
        game: &G,
        history: &HistoryOf<G>,
        player_id: usize,
    ) -> Result<()> {
        (**self).update_strategy(game, history, player_id)
    }

    fn current_strategy(&self, infostate: &str) -> Option<Vec<f64>> {
        (**self).current_strategy(infostate)
    }
}

/// A player with a given fixed strategy.
///
/// Used to evaluate trained strategies against each other.
#[derive(Debug, Clone)]
pub struct FixedPolicyPlayer {
    name: String,
    strategy: FxHashMap<String, Vec<f64>>,
}

impl FixedPolicyPlayer {
    /// Create a player from `(infostate, distribution)` pairs.
    pub fn new<I>(name: impl Into<String>, strategy: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        Self {
            name: name.into(),
            strategy: strategy.into_iter().collect(),
        }
    }

    /// The distribution played at `infostate`.
    pub fn strategy(&self, infostate: &str) -> Option<&[f64]> {
        self.strategy.get(infostate).map(Vec::as_slice)
    }
}

impl<G: Game> Player<G> for FixedPolicyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&self, infostate: &str, rng: &mut dyn RngCore) -> Result<usize> {
        let probs = self
            .strategy
            .get(infostate)
            .ok_or_else(|| SolverError::UnknownInfostate {
                infostate: infostate.to_string(),
            })?;
        Ok(sample_action(probs, rng))
    }

    fn current_strategy(&self, infostate: &str) -> Option<Vec<f64>> {
        self.strategy.get(infostate).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::rock_paper_scissor::RockPaperScissor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_policy_unknown_infostate() {
        let player = FixedPolicyPlayer::new("p", [("P0".to_string(), vec![1.0, 0.0, 0.0])]);
        let mut rng = StdRng::seed_from_u64(1);

        let chosen = Player::<RockPaperScissor>::act(&player, "P0", &mut rng).unwrap();
        assert_eq!(chosen, 0);

        let missing = Player::<RockPaperScissor>::act(&player, "P1", &mut rng);
        assert!(matches!(missing, Err(SolverError::UnknownInfostate { .. })));
    }

    #[test]
    fn test_boxed_player_delegates() {
        let boxed: Box<dyn Player<RockPaperScissor>> = Box::new(FixedPolicyPlayer::new(
            "boxed",
            [("P1".to_string(), vec![0.0, 0.0, 1.0])],
        ));
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(boxed.name(), "boxed");
        assert_eq!(boxed.act("P1", &mut rng).unwrap(), 2);
        assert_eq!(boxed.current_strategy("P1"), Some(vec![0.0, 0.0, 1.0]));
    }
}
