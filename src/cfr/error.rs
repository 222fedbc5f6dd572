//! Errors surfaced by games, players and trainers.
//!
//! None of these are retried. An inconsistent history is a bug in a game
//! definition or in the caller, so it is reported to the caller immediately.

use thiserror::Error;

/// Errors that can occur while playing or training.
#[derive(Debug, Error)]
pub enum SolverError {
    /// History length or content does not fit the game's decision structure.
    #[error("invalid history: {history}")]
    InvalidHistory {
        /// The offending history, rendered with the game's action names.
        history: String,
    },

    /// Payoffs were requested at a non-terminal node.
    #[error("payoffs requested for non-terminal history: {history}")]
    NotTerminal {
        /// The offending history.
        history: String,
    },

    /// The number of players handed to a trainer differs from the game's.
    #[error("game needs {expected} players, got {got}")]
    PlayerCountMismatch {
        /// Players the game declares.
        expected: usize,
        /// Players supplied.
        got: usize,
    },

    /// A player chose an action index outside the game's action set.
    #[error("action index {action} is outside the action set of size {n_actions}")]
    ActionOutOfRange {
        /// The chosen index.
        action: usize,
        /// Size of the action set.
        n_actions: usize,
    },

    /// A player's action table does not match the game's action set.
    #[error("player tracks {got} actions but the game has {expected}")]
    ActionCountMismatch {
        /// Size of the game's action set.
        expected: usize,
        /// Actions the player tracks.
        got: usize,
    },

    /// An alternating training schedule with an unusable block length.
    #[error("block of {block} iterations must be between 1 and the total of {total}")]
    InvalidSchedule {
        /// Iterations per block.
        block: u64,
        /// Total iterations requested.
        total: u64,
    },

    /// A fixed policy has no distribution for the requested infostate.
    #[error("no strategy for infostate {infostate:?}")]
    UnknownInfostate {
        /// The infostate that was looked up.
        infostate: String,
    },

    /// The recursion went deeper than the game's declared maximum history length.
    #[error("history depth {depth} exceeds the game's maximum of {max}")]
    DepthExceeded {
        /// Depth reached.
        depth: usize,
        /// Declared maximum.
        max: usize,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_history_message() {
        let err = SolverError::InvalidHistory {
            history: "ROCK-PAPER-SCISSOR".to_string(),
        };
        assert_eq!(err.to_string(), "invalid history: ROCK-PAPER-SCISSOR");
    }

    #[test]
    fn test_player_count_message() {
        let err = SolverError::PlayerCountMismatch { expected: 2, got: 3 };
        let msg = err.to_string();
        assert!(msg.contains("2"), "should show expected count");
        assert!(msg.contains("3"), "should show supplied count");
    }

    #[test]
    fn test_invalid_schedule_message() {
        let err = SolverError::InvalidSchedule { block: 0, total: 100 };
        assert_eq!(
            err.to_string(),
            "block of 0 iterations must be between 1 and the total of 100"
        );
    }
}
