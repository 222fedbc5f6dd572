//! Game trait definition for the trainers.
//!
//! Any game that implements the `Game` trait can be trained with both the
//! regret-matching trainer (if it is a normal-form game) and CFR.
//! A node of the game tree is identified by its [`History`]: the optional
//! chance outcome followed by the ordered player actions taken so far.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use rand::RngCore;

use crate::cfr::error::{Result, SolverError};
use crate::cfr::player::Player;

/// Trait for the actions of a game.
///
/// The action set is fixed for the lifetime of a game and every action has a
/// stable index into it, which is also its index in every strategy vector.
pub trait Action: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every action of the game, ordered by index.
    const ALL: &'static [Self];

    /// Index of this action in [`Action::ALL`].
    fn index(&self) -> usize;

    /// Stable display name, used to build history strings and infostates.
    fn name(&self) -> &'static str;

    /// Look up an action by index.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Chance type of games that have no chance player.
///
/// It has no values, so a `History<A, NoChance>` can never carry a chance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoChance {}

impl Display for NoChance {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// The sequence of actions from the root to a node.
///
/// Histories are never mutated in place: [`History::child`] returns a new
/// history with one more action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct History<A, C = NoChance> {
    chance: Option<C>,
    actions: Vec<A>,
}

impl<A, C> Default for History<A, C> {
    fn default() -> Self {
        Self {
            chance: None,
            actions: Vec::new(),
        }
    }
}

impl<A: Copy, C: Copy> History<A, C> {
    /// The empty history (root of a game without chance).
    pub fn new() -> Self {
        Self::default()
    }

    /// A history starting with a chance outcome.
    pub fn with_chance(chance: C) -> Self {
        Self {
            chance: Some(chance),
            actions: Vec::new(),
        }
    }

    /// Build a history from its parts.
    pub fn from_parts(chance: Option<C>, actions: Vec<A>) -> Self {
        Self { chance, actions }
    }

    /// The leading chance outcome, if any.
    pub fn chance(&self) -> Option<C> {
        self.chance
    }

    /// Player actions, not counting the chance outcome.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Number of player actions taken (the chance outcome is not counted).
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if no player has acted yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The history reached by taking `action` at this node.
    pub fn child(&self, action: A) -> Self {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(action);
        Self {
            chance: self.chance,
            actions,
        }
    }

    /// The history as it was after the first `len` player actions.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            chance: self.chance,
            actions: self.actions[..len.min(self.actions.len())].to_vec(),
        }
    }

    /// A copy of this history where the action at `position` is replaced.
    ///
    /// Returns `None` if `position` is out of range.
    pub fn with_action_at(&self, position: usize, action: A) -> Option<Self> {
        if position >= self.actions.len() {
            return None;
        }
        let mut actions = self.actions.clone();
        actions[position] = action;
        Some(Self {
            chance: self.chance,
            actions,
        })
    }
}

/// History type of a game.
pub type HistoryOf<G> = History<<G as Game>::Action, <G as Game>::Chance>;

/// The main Game trait that defines the interface for any game.
///
/// Players are identified by index `0..num_players()`. Every fallible method
/// returns [`SolverError::InvalidHistory`] when handed a history that cannot
/// occur in the game.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type Action = MyAction;
///     type Chance = NoChance;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game {
    /// The type representing an action a player can take.
    type Action: Action;

    /// The type representing a chance outcome, [`NoChance`] if there is none.
    type Chance: Copy + Eq + Hash + Debug + Display;

    /// Human-readable name of the game.
    fn name(&self) -> &'static str;

    /// Number of players.
    fn num_players(&self) -> usize;

    /// The fixed action set.
    fn actions(&self) -> &'static [Self::Action] {
        <Self::Action as Action>::ALL
    }

    /// Index of the player who acts at `history`.
    fn active_player(&self, history: &HistoryOf<Self>) -> Result<usize>;

    /// Whether `history` is a leaf of the game tree.
    fn is_terminal(&self, history: &HistoryOf<Self>) -> bool;

    /// Payoff of every player at a terminal history.
    ///
    /// # Errors
    /// [`SolverError::NotTerminal`] if `history` is not terminal.
    fn payoffs(&self, history: &HistoryOf<Self>) -> Result<Vec<f64>>;

    /// Information set label of the active player at a non-terminal history.
    fn infostate(&self, history: &HistoryOf<Self>) -> Result<String>;

    /// Longest possible history (in player actions).
    fn max_history_len(&self) -> usize;

    /// Whether a chance outcome is drawn before anyone acts.
    fn has_chance_player(&self) -> bool {
        false
    }

    /// Sample a chance outcome.
    fn chance_action(&self, _rng: &mut dyn RngCore) -> Option<Self::Chance> {
        None
    }

    /// Every chance outcome with its probability. Empty if there is no chance player.
    fn chance_outcomes(&self) -> Vec<(Self::Chance, f64)> {
        Vec::new()
    }

    /// Root history of one play-out, starting with a sampled chance outcome
    /// when the game has a chance player.
    fn initial_history(&self, rng: &mut dyn RngCore) -> HistoryOf<Self> {
        if self.has_chance_player() {
            if let Some(chance) = self.chance_action(rng) {
                return History::with_chance(chance);
            }
        }
        History::new()
    }

    /// Actions (and the chance outcome) joined with `-`.
    fn history_to_string(&self, history: &HistoryOf<Self>) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(history.len() + 1);
        if let Some(chance) = history.chance() {
            parts.push(chance.to_string());
        }
        parts.extend(history.actions().iter().map(|a| a.name().to_string()));
        parts.join("-")
    }

    /// Compact form of a history string for log output.
    fn shorten_history(&self, history: &str) -> String {
        history.to_string()
    }
}

/// A simultaneous-move game where every player acts exactly once.
///
/// Implementing this trait gives a [`Game`] implementation for free: the
/// history is terminal once it holds one action per player, player `k` acts at
/// a history of length `k`, and its infostate is the fixed label `P{k}`
/// (a player cannot see the actions taken before it).
pub trait NormalFormGame {
    /// The action type shared by all players.
    type Action: Action;

    /// Human-readable name of the game.
    const NAME: &'static str;

    /// Number of players.
    const N_PLAYERS: usize;

    /// Payoffs of a full action profile, `None` if the profile is not covered.
    fn profile_payoffs(&self, profile: &[Self::Action]) -> Option<Vec<f64>>;
}

impl<T: NormalFormGame> Game for T {
    type Action = <T as NormalFormGame>::Action;
    type Chance = NoChance;

    fn name(&self) -> &'static str {
        T::NAME
    }

    fn num_players(&self) -> usize {
        T::N_PLAYERS
    }

    fn active_player(&self, history: &HistoryOf<Self>) -> Result<usize> {
        if history.len() < T::N_PLAYERS {
            Ok(history.len())
        } else {
            Err(SolverError::InvalidHistory {
                history: self.history_to_string(history),
            })
        }
    }

    fn is_terminal(&self, history: &HistoryOf<Self>) -> bool {
        history.len() == T::N_PLAYERS
    }

    fn payoffs(&self, history: &HistoryOf<Self>) -> Result<Vec<f64>> {
        if !self.is_terminal(history) {
            return Err(SolverError::NotTerminal {
                history: self.history_to_string(history),
            });
        }
        self.profile_payoffs(history.actions())
            .ok_or_else(|| SolverError::InvalidHistory {
                history: self.history_to_string(history),
            })
    }

    fn infostate(&self, history: &HistoryOf<Self>) -> Result<String> {
        let player = self.active_player(history)?;
        Ok(format!("P{}", player))
    }

    fn max_history_len(&self) -> usize {
        T::N_PLAYERS
    }
}

/// Play one complete game with the given players.
///
/// Each active player is asked for an action at its infostate until the
/// history is terminal.
///
/// # Returns
/// The terminal history and the payoffs of every player.
pub fn play<G, P>(
    game: &G,
    players: &[P],
    rng: &mut dyn RngCore,
) -> Result<(HistoryOf<G>, Vec<f64>)>
where
    G: Game,
    P: Player<G>,
{
    if players.len() != game.num_players() {
        return Err(SolverError::PlayerCountMismatch {
            expected: game.num_players(),
            got: players.len(),
        });
    }

    let actions = game.actions();
    let mut history = game.initial_history(rng);

    while !game.is_terminal(&history) {
        if history.len() >= game.max_history_len() {
            return Err(SolverError::DepthExceeded {
                depth: history.len(),
                max: game.max_history_len(),
            });
        }

        let active = game.active_player(&history)?;
        let infostate = game.infostate(&history)?;
        let player = players.get(active).ok_or_else(|| SolverError::InvalidHistory {
            history: game.history_to_string(&history),
        })?;

        let index = player.act(&infostate, rng)?;
        let action = *actions.get(index).ok_or(SolverError::ActionOutOfRange {
            action: index,
            n_actions: actions.len(),
        })?;
        history = history.child(action);
    }

    let payoffs = game.payoffs(&history)?;
    Ok((history, payoffs))
}
