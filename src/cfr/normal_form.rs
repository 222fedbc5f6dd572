//! Trainer for simultaneous-move games.
//!
//! Each iteration plays one game with the players' current strategies and
//! then lets every player that is not frozen update itself from the realized
//! history. The trainer records the instantaneous strategies and payoffs so
//! that their running averages can be reported.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cfr::config::NormalFormConfig;
use crate::cfr::error::{Result, SolverError};
use crate::cfr::game::{play, Game};
use crate::cfr::player::Player;

/// Repeated-play trainer.
///
/// # Example
/// ```ignore
/// let players = vec![
///     RegretMatchingPlayer::new("RM0", 3),
///     RegretMatchingPlayer::new("RM1", 3),
/// ];
/// let mut trainer = NormalFormTrainer::new(RockPaperScissor, players, NormalFormConfig::default())?;
/// trainer.train(10_000, &[])?;
/// let averages = trainer.avg_strategies();
/// ```
pub struct NormalFormTrainer<G: Game, P: Player<G>> {
    game: G,
    players: Vec<P>,
    config: NormalFormConfig,
    rng: StdRng,

    /// Games played over the trainer's lifetime.
    iterations: u64,

    /// Per player: sum of the recorded instantaneous strategies.
    strategy_sums: Vec<Vec<f64>>,

    /// Per player: number of recorded strategies.
    strategy_counts: Vec<u64>,

    /// Per player: sum of realized payoffs.
    payoff_sums: Vec<f64>,
}

impl<G: Game, P: Player<G>> NormalFormTrainer<G, P> {
    /// Create a trainer.
    ///
    /// # Errors
    /// [`SolverError::PlayerCountMismatch`] if `players` does not seat the game exactly.
    pub fn new(game: G, players: Vec<P>, config: NormalFormConfig) -> Result<Self> {
        if players.len() != game.num_players() {
            return Err(SolverError::PlayerCountMismatch {
                expected: game.num_players(),
                got: players.len(),
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let n = players.len();

        Ok(Self {
            game,
            players,
            config,
            rng,
            iterations: 0,
            strategy_sums: vec![Vec::new(); n],
            strategy_counts: vec![0; n],
            payoff_sums: vec![0.0; n],
        })
    }

    /// Play `iterations` games, updating every player not listed in `freeze`.
    ///
    /// # Returns
    /// The mean payoff of each player over the games of this call.
    pub fn train(&mut self, iterations: u64, freeze: &[usize]) -> Result<Vec<f64>> {
        let n = self.players.len();
        let mut call_payoffs = vec![0.0; n];
        let start_time = Instant::now();
        let pb = self.progress_bar(iterations);

        for _ in 0..iterations {
            let (history, payoffs) = play(&self.game, &self.players, &mut self.rng)?;

            for (player_id, player) in self.players.iter_mut().enumerate() {
                let infostate = self.game.infostate(&history.prefix(player_id))?;
                if let Some(strategy) = player.current_strategy(&infostate) {
                    let sums = &mut self.strategy_sums[player_id];
                    if sums.is_empty() {
                        sums.resize(strategy.len(), 0.0);
                    }
                    for (s, p) in sums.iter_mut().zip(&strategy) {
                        *s += p;
                    }
                    self.strategy_counts[player_id] += 1;
                }

                if !freeze.contains(&player_id) {
                    player.update_strategy(&self.game, &history, player_id)?;
                }
            }

            for (i, payoff) in payoffs.iter().enumerate() {
                call_payoffs[i] += payoff;
                self.payoff_sums[i] += payoff;
            }
            self.iterations += 1;
            pb.inc(1);
        }
        pb.finish_and_clear();

        if iterations > 0 {
            for p in call_payoffs.iter_mut() {
                *p /= iterations as f64;
            }
        }

        debug!(
            "{}: {} games in {:.2}s, frozen {:?}, mean payoffs {:?}",
            self.game.name(),
            iterations,
            start_time.elapsed().as_secs_f64(),
            freeze,
            call_payoffs
        );

        Ok(call_payoffs)
    }

    /// Co-evolution schedule: in blocks of `block` games, train one player at a
    /// time while every other player is frozen, until about `total` games were
    /// played per player.
    ///
    /// # Returns
    /// The mean payoffs over the trainer's lifetime, or `InvalidSchedule` when
    /// `block` is zero or larger than `total`.
    pub fn train_alternating(&mut self, total: u64, block: u64) -> Result<Vec<f64>> {
        if block == 0 || block > total {
            return Err(SolverError::InvalidSchedule { block, total });
        }
        let n = self.players.len();
        let rounds = total / block;

        for _ in 0..rounds {
            for learner in 0..n {
                let frozen: Vec<usize> = (0..n).filter(|&p| p != learner).collect();
                self.train(block, &frozen)?;
            }
        }

        Ok(self.avg_payoffs())
    }

    /// Mean payoff per player over every game this trainer has played.
    pub fn avg_payoffs(&self) -> Vec<f64> {
        if self.iterations == 0 {
            return vec![0.0; self.players.len()];
        }
        self.payoff_sums
            .iter()
            .map(|&s| s / self.iterations as f64)
            .collect()
    }

    /// Arithmetic mean of each player's recorded instantaneous strategies.
    ///
    /// `None` for players that expose no strategy or before any game was played.
    pub fn avg_strategies(&self) -> Vec<Option<Vec<f64>>> {
        self.strategy_sums
            .iter()
            .zip(&self.strategy_counts)
            .map(|(sums, &count)| {
                if count == 0 {
                    None
                } else {
                    Some(sums.iter().map(|&s| s / count as f64).collect())
                }
            })
            .collect()
    }

    /// Log the average strategies and payoffs.
    pub fn log_summary(&self) {
        info!("{} after {} games", self.game.name(), self.iterations);
        for (player, avg) in self.players.iter().zip(self.avg_strategies()) {
            match avg {
                Some(s) => info!("{:<12} avg strategy {}", player.name(), format_probs(&s)),
                None => info!("{:<12} avg strategy n/a", player.name()),
            }
        }
        info!("average payoffs {}", format_probs(&self.avg_payoffs()));
    }

    /// The players, in seat order.
    pub fn players(&self) -> &[P] {
        &self.players
    }

    /// The game being played.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Games played so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &NormalFormConfig {
        &self.config
    }

    fn progress_bar(&self, iterations: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(iterations);
        if let Ok(style) = ProgressStyle::with_template(
            "  RM/{msg} [{bar:40}] {pos}/{len} games [{elapsed} < {eta}, {per_sec}]",
        ) {
            pb.set_style(style);
        }
        pb.set_message(self.game.name());
        pb
    }
}

/// Format a probability or payoff vector with two decimals.
pub(crate) fn format_probs(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::regret_matching::RegretMatchingPlayer;
    use crate::games::bar_crowding::BarCrowding;
    use crate::games::prisoner_dilemma::PrisonerDilemma;
    use crate::games::rock_paper_scissor::RockPaperScissor;
    use rand::RngCore;

    /// Always answers with an index one past the RPS action set.
    struct OffByOne;

    impl Player<RockPaperScissor> for OffByOne {
        fn name(&self) -> &str {
            "off-by-one"
        }

        fn act(&self, _infostate: &str, _rng: &mut dyn RngCore) -> Result<usize> {
            Ok(3)
        }
    }

    fn rm_players(n: usize, actions: usize) -> Vec<RegretMatchingPlayer> {
        (0..n)
            .map(|i| RegretMatchingPlayer::new(format!("RM{}", i), actions))
            .collect()
    }

    #[test]
    fn test_rejects_wrong_player_count() {
        let result = NormalFormTrainer::new(
            RockPaperScissor,
            rm_players(3, 3),
            NormalFormConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SolverError::PlayerCountMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_zero_iterations_change_nothing() {
        let config = NormalFormConfig::default().with_seed(1);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, rm_players(2, 3), config).unwrap();
        let payoffs = trainer.train(0, &[]).unwrap();

        assert_eq!(payoffs, vec![0.0, 0.0]);
        assert_eq!(trainer.iterations(), 0);
        assert_eq!(trainer.avg_strategies(), vec![None, None]);
        for player in trainer.players() {
            assert_eq!(player.cum_regrets(), &[0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_frozen_player_is_untouched() {
        let config = NormalFormConfig::default().with_seed(9);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, rm_players(2, 3), config).unwrap();
        trainer.train(200, &[]).unwrap();
        let before = trainer.players()[1].cum_regrets().to_vec();
        let learner_before = trainer.players()[0].cum_regrets().to_vec();

        trainer.train(500, &[1]).unwrap();

        assert_eq!(trainer.players()[1].cum_regrets(), before.as_slice());
        assert_ne!(trainer.players()[0].cum_regrets(), learner_before.as_slice());
        assert_eq!(trainer.iterations(), 700);
    }

    #[test]
    fn test_rps_average_strategy_is_near_uniform() {
        let config = NormalFormConfig::default().with_seed(0);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, rm_players(2, 3), config).unwrap();
        trainer.train(20_000, &[]).unwrap();

        for avg in trainer.avg_strategies() {
            let avg = avg.unwrap();
            for p in avg {
                assert!((p - 1.0 / 3.0).abs() < 0.05, "average {} should be near 1/3", p);
            }
        }
        let payoffs = trainer.avg_payoffs();
        assert!(payoffs[0].abs() < 0.05, "zero-sum game should average near 0");
        assert!((payoffs[0] + payoffs[1]).abs() < 1e-9);
    }

    #[test]
    fn test_prisoner_dilemma_learns_to_snitch() {
        let config = NormalFormConfig::default().with_seed(4);
        let mut trainer =
            NormalFormTrainer::new(PrisonerDilemma, rm_players(2, 2), config).unwrap();
        trainer.train(5_000, &[]).unwrap();

        for player in trainer.players() {
            // snitching dominates, so its regret only grows
            assert!(player.strategy()[0] > 0.99);
        }
    }

    #[test]
    fn test_three_player_bar_crowding_runs() {
        let config = NormalFormConfig::default().with_seed(2);
        let mut trainer =
            NormalFormTrainer::new(BarCrowding, rm_players(3, 2), config).unwrap();
        let payoffs = trainer.train(1_000, &[]).unwrap();
        assert_eq!(payoffs.len(), 3);
        assert_eq!(trainer.avg_strategies().len(), 3);
    }

    #[test]
    fn test_alternating_schedule_trains_everyone() {
        let config = NormalFormConfig::default().with_seed(5);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, rm_players(2, 3), config).unwrap();
        trainer.train_alternating(1_000, 10).unwrap();

        assert_eq!(trainer.iterations(), 2_000);
        for player in trainer.players() {
            assert!(player.cum_regrets().iter().any(|&r| r != 0.0));
        }
    }

    #[test]
    fn test_alternating_rejects_unusable_block() {
        let config = NormalFormConfig::default().with_seed(5);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, rm_players(2, 3), config).unwrap();

        assert!(matches!(
            trainer.train_alternating(1_000, 0),
            Err(SolverError::InvalidSchedule { block: 0, total: 1_000 })
        ));
        assert!(matches!(
            trainer.train_alternating(10, 20),
            Err(SolverError::InvalidSchedule { block: 20, total: 10 })
        ));
        assert_eq!(trainer.iterations(), 0);
    }

    #[test]
    fn test_train_rejects_action_out_of_range() {
        let config = NormalFormConfig::default().with_seed(5);
        let mut trainer =
            NormalFormTrainer::new(RockPaperScissor, vec![OffByOne, OffByOne], config).unwrap();

        assert!(matches!(
            trainer.train(1, &[]),
            Err(SolverError::ActionOutOfRange {
                action: 3,
                n_actions: 3
            })
        ));
    }
}
