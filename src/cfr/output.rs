//! Strategy report export.
//!
//! This module turns a trained solver into a serializable summary: the average
//! strategy of every player at every infostate plus the average utilities.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cfr::error::Result;
use crate::cfr::game::{Action, Game};
use crate::cfr::solver::CFRSolver;

/// Average strategies of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    /// Player name
    pub name: String,
    /// Infostate -> average strategy
    pub strategies: BTreeMap<String, Vec<f64>>,
}

/// Complete solver output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Game name
    pub game: String,
    /// Action names, in strategy-vector order
    pub actions: Vec<String>,
    /// Number of iterations
    pub iterations: u64,
    /// Per player, in seat order
    pub players: Vec<PlayerReport>,
    /// Mean root utility per player
    pub average_utilities: Vec<f64>,
}

impl StrategyReport {
    /// Create a report from a solver.
    pub fn from_solver<G: Game>(solver: &CFRSolver<G>) -> Self {
        let players = solver
            .players()
            .iter()
            .map(|p| PlayerReport {
                name: p.name().to_string(),
                strategies: p.average_strategies(),
            })
            .collect();

        Self {
            game: solver.game().name().to_string(),
            actions: solver
                .game()
                .actions()
                .iter()
                .map(|a| a.name().to_string())
                .collect(),
            iterations: solver.iteration(),
            players,
            average_utilities: solver.average_utilities(),
        }
    }

    /// Save to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Average strategy of `player` at `infostate`.
    pub fn strategy(&self, player: usize, infostate: &str) -> Option<&[f64]> {
        self.players
            .get(player)?
            .strategies
            .get(infostate)
            .map(Vec::as_slice)
    }
}
