//! The two-player Prisoner's Dilemma.
//!
//! Two partners are questioned in separate rooms. Snitching sets the snitch
//! free and gives the silent partner 3 years; both silent serve 1 year each;
//! both snitching serve 2 years each. Payoffs are negative years served.
//!
//! The only Nash equilibrium is snitch/snitch, even though both players would
//! be better off staying silent.

use crate::cfr::game::{Action, NormalFormGame};

/// Actions in the Prisoner's Dilemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrisonerDilemmaAction {
    /// Betray the partner
    Snitch,
    /// Stay silent
    Silence,
}

impl Action for PrisonerDilemmaAction {
    const ALL: &'static [Self] = &[PrisonerDilemmaAction::Snitch, PrisonerDilemmaAction::Silence];

    fn index(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            PrisonerDilemmaAction::Snitch => "SNITCH",
            PrisonerDilemmaAction::Silence => "SILENCE",
        }
    }
}

/// Prisoner's Dilemma game.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrisonerDilemma;

impl NormalFormGame for PrisonerDilemma {
    type Action = PrisonerDilemmaAction;
    const NAME: &'static str = "PrisonerDilemma";
    const N_PLAYERS: usize = 2;

    fn profile_payoffs(&self, profile: &[PrisonerDilemmaAction]) -> Option<Vec<f64>> {
        use PrisonerDilemmaAction::*;
        let payoffs = match profile {
            [Snitch, Snitch] => vec![-2.0, -2.0],
            [Silence, Silence] => vec![-1.0, -1.0],
            [Silence, Snitch] => vec![-3.0, 0.0],
            [Snitch, Silence] => vec![0.0, -3.0],
            _ => return None,
        };
        Some(payoffs)
    }
}
