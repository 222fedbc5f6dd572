//! A three-player version of the El Farol bar problem.
//!
//! Everyone wants to go to the bar, but three is a crowd and one alone feels
//! silly. Exactly two at the bar is the best outcome for those two.
//!
//! ## Payoffs
//!
//! - Bar overcrowded (all three go): -1 for everyone
//! - Alone at the bar: 0
//! - Stayed home: +1
//! - One of exactly two at the bar: +2
//!
//! The pure Nash equilibria are all three staying home and the three outcomes
//! where exactly two players go.

use crate::cfr::game::{Action, NormalFormGame};

/// Actions in the bar-crowding game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarAction {
    /// Go out
    GoToBar,
    /// Stay in
    StayHome,
}

impl Action for BarAction {
    const ALL: &'static [Self] = &[BarAction::GoToBar, BarAction::StayHome];

    fn index(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            BarAction::GoToBar => "GO_TO_BAR",
            BarAction::StayHome => "STAY_HOME",
        }
    }
}

/// Bar-crowding game.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarCrowding;

impl NormalFormGame for BarCrowding {
    type Action = BarAction;
    const NAME: &'static str = "BarCrowding";
    const N_PLAYERS: usize = 3;

    fn profile_payoffs(&self, profile: &[BarAction]) -> Option<Vec<f64>> {
        if profile.len() != Self::N_PLAYERS {
            return None;
        }
        let at_bar = profile.iter().filter(|&&a| a == BarAction::GoToBar).count();
        let bar_payoff = match at_bar {
            1 => 0.0,
            2 => 2.0,
            _ => -1.0,
        };
        Some(
            profile
                .iter()
                .map(|&a| match a {
                    BarAction::GoToBar => bar_payoff,
                    BarAction::StayHome => 1.0,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::game::{Game, History};

    fn payoffs(profile: [BarAction; 3]) -> Vec<f64> {
        BarCrowding
            .payoffs(&History::from_parts(None, profile.to_vec()))
            .unwrap()
    }

    #[test]
    fn test_payoff_table() {
        use BarAction::*;
        assert_eq!(payoffs([StayHome, StayHome, StayHome]), vec![1.0, 1.0, 1.0]);
        assert_eq!(payoffs([GoToBar, StayHome, StayHome]), vec![0.0, 1.0, 1.0]);
        assert_eq!(payoffs([StayHome, GoToBar, GoToBar]), vec![1.0, 2.0, 2.0]);
        assert_eq!(payoffs([GoToBar, StayHome, GoToBar]), vec![2.0, 1.0, 2.0]);
        assert_eq!(payoffs([GoToBar, GoToBar, GoToBar]), vec![-1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_three_players() {
        let game = BarCrowding;
        assert_eq!(game.num_players(), 3);
        let history = History::new().child(BarAction::GoToBar).child(BarAction::StayHome);
        assert!(!game.is_terminal(&history));
        assert_eq!(game.infostate(&history).unwrap(), "P2");
    }
}
