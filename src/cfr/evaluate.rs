//! Evaluation of fixed strategy profiles.
//!
//! A strategy profile is one `infostate -> distribution` map per player, as
//! returned by [`crate::cfr::CFRSolver::average_strategies`].

use std::collections::BTreeMap;

use rand::RngCore;

use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{play, Game, History, HistoryOf};
use crate::cfr::player::FixedPolicyPlayer;
use crate::cfr::strategy::uniform;

/// Strategy of one player: infostate -> action distribution.
pub type StrategyMap = BTreeMap<String, Vec<f64>>;

/// Monte-Carlo estimate of the payoffs of a strategy profile.
///
/// Plays `n_iters` games between fixed-policy players and averages the payoffs.
///
/// # Errors
/// [`SolverError::UnknownInfostate`] if a player reaches an infostate its
/// strategy does not cover, plus any error of [`play`].
pub fn evaluate_strategies<G: Game>(
    game: &G,
    strategies: &[StrategyMap],
    n_iters: u64,
    rng: &mut dyn RngCore,
) -> Result<Vec<f64>> {
    let players: Vec<FixedPolicyPlayer> = strategies
        .iter()
        .enumerate()
        .map(|(i, s)| FixedPolicyPlayer::new(format!("fixed{}", i), s.clone()))
        .collect();

    let mut sums = vec![0.0; game.num_players()];
    for _ in 0..n_iters {
        let (_, payoffs) = play(game, &players, rng)?;
        for (sum, p) in sums.iter_mut().zip(&payoffs) {
            *sum += p;
        }
    }

    if n_iters > 0 {
        for sum in sums.iter_mut() {
            *sum /= n_iters as f64;
        }
    }
    Ok(sums)
}

/// Exact expected payoffs of a strategy profile.
///
/// Walks the full game tree below every chance outcome. Infostates missing
/// from a player's strategy are played uniformly.
///
/// # Errors
/// [`SolverError::PlayerCountMismatch`] if the profile does not seat the game.
pub fn expected_payoffs<G: Game>(game: &G, strategies: &[StrategyMap]) -> Result<Vec<f64>> {
    if strategies.len() != game.num_players() {
        return Err(SolverError::PlayerCountMismatch {
            expected: game.num_players(),
            got: strategies.len(),
        });
    }

    if !game.has_chance_player() {
        return node_value(game, strategies, &History::new());
    }

    let mut total = vec![0.0; game.num_players()];
    for (chance, prob) in game.chance_outcomes() {
        let values = node_value(game, strategies, &History::with_chance(chance))?;
        for (t, v) in total.iter_mut().zip(&values) {
            *t += prob * v;
        }
    }
    Ok(total)
}

fn node_value<G: Game>(
    game: &G,
    strategies: &[StrategyMap],
    history: &HistoryOf<G>,
) -> Result<Vec<f64>> {
    if game.is_terminal(history) {
        return game.payoffs(history);
    }
    if history.len() >= game.max_history_len() {
        return Err(SolverError::DepthExceeded {
            depth: history.len(),
            max: game.max_history_len(),
        });
    }

    let actions = game.actions();
    let active = game.active_player(history)?;
    let infostate = game.infostate(history)?;
    let policy = strategies[active]
        .get(&infostate)
        .cloned()
        .unwrap_or_else(|| uniform(actions.len()));

    let mut value = vec![0.0; game.num_players()];
    for (&action, &prob) in actions.iter().zip(&policy) {
        if prob == 0.0 {
            continue;
        }
        let child = node_value(game, strategies, &history.child(action))?;
        for (v, c) in value.iter_mut().zip(&child) {
            *v += prob * c;
        }
    }
    Ok(value)
}
