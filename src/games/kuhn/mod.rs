//! Kuhn Poker implementation for CFR validation.
//!
//! Kuhn Poker is a simplified poker game used to validate CFR implementations
//! because it has a known, mathematically proven Nash equilibrium.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack, Queen, King
//! - 2 players, each antes 1 chip
//! - Chance deals one card to each player (six equally likely deals)
//! - Player 0 acts first: Pass or Bet (1 chip)
//! - Player 1 responds based on player 0's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! P0 (first to act)
//! ├── Pass
//! │   └── P1
//! │       ├── Pass → Showdown (±1)
//! │       └── Bet
//! │           └── P0
//! │               ├── Pass → P1 wins (-1)
//! │               └── Bet → Showdown (±2)
//! └── Bet
//!     └── P1
//!         ├── Pass → P0 wins (+1)
//!         └── Bet → Showdown (±2)
//! ```
//!
//! ## Known Nash Equilibrium
//!
//! - **Player 0 with Jack**: Bet with probability α ∈ [0, 1/3]
//! - **Player 0 with Queen**: Always Pass
//! - **Player 0 with King**: Bet with probability 3α
//! - **Player 1 facing Bet with Jack**: Always Fold
//! - **Player 1 facing Bet with Queen**: Call with probability 1/3
//! - **Player 1 facing Bet with King**: Always Call
//!
//! **Expected Value**: Player 0 EV = -1/18 ≈ -0.0556

use std::fmt;

use rand::{Rng, RngCore};

use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{Action, Game, HistoryOf};

/// Actions in Kuhn Poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuhnAction {
    /// Pass (check if no bet, fold if facing bet)
    Pass,
    /// Bet (or call if facing bet)
    Bet,
}

impl Action for KuhnAction {
    const ALL: &'static [Self] = &[KuhnAction::Pass, KuhnAction::Bet];

    fn index(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            KuhnAction::Pass => "PASS",
            KuhnAction::Bet => "BET",
        }
    }
}

/// A card, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Card {
    /// Jack
    J,
    /// Queen
    Q,
    /// King
    K,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Card::J => "J",
            Card::Q => "Q",
            Card::K => "K",
        };
        write!(f, "{}", c)
    }
}

/// The chance outcome: one card for each player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KuhnDeal {
    /// cards[0] is player 0's card, cards[1] is player 1's card
    pub cards: [Card; 2],
}

impl KuhnDeal {
    /// Every possible deal.
    pub const ALL: [KuhnDeal; 6] = [
        KuhnDeal::new(Card::J, Card::Q),
        KuhnDeal::new(Card::J, Card::K),
        KuhnDeal::new(Card::Q, Card::K),
        KuhnDeal::new(Card::Q, Card::J),
        KuhnDeal::new(Card::K, Card::J),
        KuhnDeal::new(Card::K, Card::Q),
    ];

    /// Deal `first` to player 0 and `second` to player 1.
    pub const fn new(first: Card, second: Card) -> Self {
        Self {
            cards: [first, second],
        }
    }

    /// +1 if player 0 holds the higher card, -1 otherwise.
    fn showdown(&self) -> f64 {
        if self.cards[0] > self.cards[1] {
            1.0
        } else {
            -1.0
        }
    }
}

impl fmt::Display for KuhnDeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}

/// Kuhn Poker game.
#[derive(Debug, Clone, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }

    fn deal(&self, history: &HistoryOf<Self>) -> Result<KuhnDeal> {
        history.chance().ok_or_else(|| SolverError::InvalidHistory {
            history: self.history_to_string(history),
        })
    }
}

impl Game for KuhnPoker {
    type Action = KuhnAction;
    type Chance = KuhnDeal;

    fn name(&self) -> &'static str {
        "KuhnPoker"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn active_player(&self, history: &HistoryOf<Self>) -> Result<usize> {
        if history.len() >= 3 {
            return Err(SolverError::InvalidHistory {
                history: self.history_to_string(history),
            });
        }
        Ok(history.len() % 2)
    }

    fn is_terminal(&self, history: &HistoryOf<Self>) -> bool {
        use KuhnAction::*;
        // Terminal histories:
        // PASS-PASS, BET-PASS, BET-BET, PASS-BET-PASS, PASS-BET-BET
        matches!(
            history.actions(),
            [Pass, Pass] | [Bet, Pass] | [Bet, Bet] | [Pass, Bet, _]
        )
    }

    fn payoffs(&self, history: &HistoryOf<Self>) -> Result<Vec<f64>> {
        use KuhnAction::*;
        let deal = self.deal(history)?;

        // Payoff for player 0 (player 1's payoff is the negation)
        let p0_payoff = match history.actions() {
            // Showdown after both pass
            [Pass, Pass] => deal.showdown(),
            // Player 1 folded to a bet
            [Bet, Pass] => 1.0,
            // Player 0 folded to a bet
            [Pass, Bet, Pass] => -1.0,
            // Showdown after bet-call
            [Bet, Bet] | [Pass, Bet, Bet] => 2.0 * deal.showdown(),
            [] | [_] | [Pass, Bet] => {
                return Err(SolverError::NotTerminal {
                    history: self.history_to_string(history),
                })
            }
            _ => {
                return Err(SolverError::InvalidHistory {
                    history: self.history_to_string(history),
                })
            }
        };

        Ok(vec![p0_payoff, -p0_payoff])
    }

    /// The active player's card followed by the public actions, e.g. `Q-PASS-BET`.
    fn infostate(&self, history: &HistoryOf<Self>) -> Result<String> {
        let deal = self.deal(history)?;
        let player = self.active_player(history)?;

        let mut infostate = deal.cards[player].to_string();
        for action in history.actions() {
            infostate.push('-');
            infostate.push_str(action.name());
        }
        Ok(infostate)
    }

    fn max_history_len(&self) -> usize {
        3
    }

    fn has_chance_player(&self) -> bool {
        true
    }

    fn chance_action(&self, rng: &mut dyn RngCore) -> Option<KuhnDeal> {
        Some(KuhnDeal::ALL[rng.gen_range(0..KuhnDeal::ALL.len())])
    }

    fn chance_outcomes(&self) -> Vec<(KuhnDeal, f64)> {
        let p = 1.0 / KuhnDeal::ALL.len() as f64;
        KuhnDeal::ALL.iter().map(|&deal| (deal, p)).collect()
    }

    /// `KJ-PASS-BET` becomes `KJPB`.
    fn shorten_history(&self, history: &str) -> String {
        history
            .split('-')
            .map(|part| match part {
                "PASS" => "P",
                "BET" => "B",
                other => other,
            })
            .collect()
    }
}
