//! Rock-paper-scissor and its asymmetric variant.
//!
//! Both are two-player zero-sum normal-form games. Player 1 does not see
//! what player 0 chose, so each player has a single infostate.
//!
//! ## Known Nash Equilibrium
//!
//! - **Standard**: uniform, `[1/3, 1/3, 1/3]` for both players
//! - **Asymmetric** (any outcome involving scissor pays ±2): `[0.4, 0.4, 0.2]`

use crate::cfr::game::{Action, NormalFormGame};

/// Actions in rock-paper-scissor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpsAction {
    /// Beats scissor
    Rock,
    /// Beats rock
    Paper,
    /// Beats paper
    Scissor,
}

impl Action for RpsAction {
    const ALL: &'static [Self] = &[RpsAction::Rock, RpsAction::Paper, RpsAction::Scissor];

    fn index(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            RpsAction::Rock => "ROCK",
            RpsAction::Paper => "PAPER",
            RpsAction::Scissor => "SCISSOR",
        }
    }
}

/// +1 if `a` beats `b`, -1 if it loses, 0 on a tie.
fn outcome(a: RpsAction, b: RpsAction) -> f64 {
    use RpsAction::*;
    match (a, b) {
        (Rock, Scissor) | (Paper, Rock) | (Scissor, Paper) => 1.0,
        (Rock, Paper) | (Paper, Scissor) | (Scissor, Rock) => -1.0,
        _ => 0.0,
    }
}

/// Standard rock-paper-scissor: the winner gets 1, the loser -1.
#[derive(Debug, Clone, Copy, Default)]
pub struct RockPaperScissor;

impl NormalFormGame for RockPaperScissor {
    type Action = RpsAction;
    const NAME: &'static str = "RockPaperScissor";
    const N_PLAYERS: usize = 2;

    fn profile_payoffs(&self, profile: &[RpsAction]) -> Option<Vec<f64>> {
        match profile {
            &[a, b] => {
                let v = outcome(a, b);
                Some(vec![v, -v])
            }
            _ => None,
        }
    }
}

/// Rock-paper-scissor where every decisive outcome involving scissor pays double.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsymmetricRockPaperScissor;

impl NormalFormGame for AsymmetricRockPaperScissor {
    type Action = RpsAction;
    const NAME: &'static str = "AsymmetricRockPaperScissor";
    const N_PLAYERS: usize = 2;

    fn profile_payoffs(&self, profile: &[RpsAction]) -> Option<Vec<f64>> {
        match profile {
            &[a, b] => {
                let stake = if a == RpsAction::Scissor || b == RpsAction::Scissor {
                    2.0
                } else {
                    1.0
                };
                let v = stake * outcome(a, b);
                Some(vec![v, -v])
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::game::{Game, History};

    #[test]
    fn test_rps_payoffs() {
        let game = RockPaperScissor;
        let payoffs = |a, b| game.payoffs(&History::from_parts(None, vec![a, b])).unwrap();

        assert_eq!(payoffs(RpsAction::Rock, RpsAction::Scissor), vec![1.0, -1.0]);
        assert_eq!(payoffs(RpsAction::Scissor, RpsAction::Rock), vec![-1.0, 1.0]);
        assert_eq!(payoffs(RpsAction::Paper, RpsAction::Paper), vec![0.0, 0.0]);
    }

    #[test]
    fn test_asymmetric_payoffs() {
        let game = AsymmetricRockPaperScissor;
        let payoffs = |a, b| game.payoffs(&History::from_parts(None, vec![a, b])).unwrap();

        assert_eq!(payoffs(RpsAction::Rock, RpsAction::Paper), vec![-1.0, 1.0]);
        assert_eq!(payoffs(RpsAction::Rock, RpsAction::Scissor), vec![2.0, -2.0]);
        assert_eq!(payoffs(RpsAction::Paper, RpsAction::Scissor), vec![-2.0, 2.0]);
        assert_eq!(payoffs(RpsAction::Scissor, RpsAction::Scissor), vec![0.0, 0.0]);
    }

    #[test]
    fn test_action_indices() {
        for (i, action) in RpsAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(RpsAction::from_index(i), Some(*action));
        }
        assert_eq!(RpsAction::from_index(3), None);
    }
}
