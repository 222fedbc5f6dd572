//! Command-line trainer for the bundled games.
//!
//! Usage:
//!   cargo run --release --bin solve -- cfr --game kuhn --iterations 100000
//!   cargo run --release --bin solve -- regret-matching --game rps --freeze-duration 10
//!
//! Run with `--help` for every option.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use imperfect_cfr::cfr::{
    expected_payoffs, CFRConfig, CFRSolver, Game, NormalFormConfig, NormalFormTrainer,
    RegretMatchingPlayer, StrategyReport,
};
use imperfect_cfr::games::bar_crowding::BarCrowding;
use imperfect_cfr::games::kuhn::KuhnPoker;
use imperfect_cfr::games::prisoner_dilemma::PrisonerDilemma;
use imperfect_cfr::games::rock_paper_scissor::{AsymmetricRockPaperScissor, RockPaperScissor};

#[derive(Parser)]
#[command(name = "solve")]
#[command(about = "Regret matching and CFR for small imperfect-information games")]
struct Cli {
    /// Log verbosity (debug traces every CFR node)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train with Counterfactual Regret Minimization.
    Cfr {
        /// Game to solve
        #[arg(short, long, value_enum, default_value = "kuhn")]
        game: GameChoice,
        /// Number of CFR iterations
        #[arg(short, long, default_value_t = 100_000)]
        iterations: u64,
        /// Random seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// CFRConfig JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the average strategies to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },
    /// Train regret-matching players on a normal-form game.
    RegretMatching {
        /// Game to play
        #[arg(short, long, value_enum, default_value = "rps")]
        game: NormalFormChoice,
        /// Number of games per player
        #[arg(short, long, default_value_t = 10_000)]
        iterations: u64,
        /// Train one player at a time in blocks of this many games, freezing the others
        #[arg(short, long)]
        freeze_duration: Option<u64>,
        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameChoice {
    Kuhn,
    Rps,
    AsymmetricRps,
    PrisonerDilemma,
    BarCrowding,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalFormChoice {
    Rps,
    AsymmetricRps,
    PrisonerDilemma,
    BarCrowding,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(
        cli.log_level.into(),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    match cli.command {
        Commands::Cfr {
            game,
            iterations,
            seed,
            config,
            output,
            progress,
        } => {
            let mut cfr_config = match config {
                Some(path) => CFRConfig::from_json_file(path)?,
                None => CFRConfig::default(),
            };
            if let Some(seed) = seed {
                cfr_config = cfr_config.with_seed(seed);
            }
            if progress {
                cfr_config = cfr_config.with_progress(true);
            }

            match game {
                GameChoice::Kuhn => run_cfr(KuhnPoker::new(), iterations, cfr_config, output)?,
                GameChoice::Rps => run_cfr(RockPaperScissor, iterations, cfr_config, output)?,
                GameChoice::AsymmetricRps => {
                    run_cfr(AsymmetricRockPaperScissor, iterations, cfr_config, output)?
                }
                GameChoice::PrisonerDilemma => {
                    run_cfr(PrisonerDilemma, iterations, cfr_config, output)?
                }
                GameChoice::BarCrowding => run_cfr(BarCrowding, iterations, cfr_config, output)?,
            }
        }
        Commands::RegretMatching {
            game,
            iterations,
            freeze_duration,
            seed,
            progress,
        } => {
            let mut nf_config = NormalFormConfig::default().with_progress(progress);
            if let Some(seed) = seed {
                nf_config = nf_config.with_seed(seed);
            }

            match game {
                NormalFormChoice::Rps => {
                    run_regret_matching(RockPaperScissor, iterations, freeze_duration, nf_config)?
                }
                NormalFormChoice::AsymmetricRps => run_regret_matching(
                    AsymmetricRockPaperScissor,
                    iterations,
                    freeze_duration,
                    nf_config,
                )?,
                NormalFormChoice::PrisonerDilemma => {
                    run_regret_matching(PrisonerDilemma, iterations, freeze_duration, nf_config)?
                }
                NormalFormChoice::BarCrowding => {
                    run_regret_matching(BarCrowding, iterations, freeze_duration, nf_config)?
                }
            }
        }
    }

    Ok(())
}

fn run_cfr<G: Game>(
    game: G,
    iterations: u64,
    config: CFRConfig,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    info!("{} with CFR for {} iterations", game.name(), iterations);
    info!("Config: {:?}", config);

    let mut solver = CFRSolver::new(game, config);
    let stats = solver.train(iterations)?;
    info!(
        "Trained {} info sets in {:.2}s ({:.0} iter/s)",
        stats.info_sets, stats.elapsed_seconds, stats.iterations_per_second
    );

    solver.log_summary();

    let value = expected_payoffs(solver.game(), &solver.average_strategies())?;
    info!("Expected payoffs of the average strategies: {:?}", value);

    if let Some(path) = output {
        StrategyReport::from_solver(&solver).save_json(&path)?;
        info!("Strategies written to {}", path.display());
    }
    Ok(())
}

fn run_regret_matching<G: Game>(
    game: G,
    iterations: u64,
    freeze_duration: Option<u64>,
    config: NormalFormConfig,
) -> Result<(), Box<dyn Error>> {
    let num_actions = game.actions().len();
    let players: Vec<RegretMatchingPlayer> = (0..game.num_players())
        .map(|i| RegretMatchingPlayer::new(format!("RM{}", i), num_actions))
        .collect();

    let mut trainer = NormalFormTrainer::new(game, players, config)?;
    match freeze_duration {
        Some(block) => {
            info!(
                "{} with alternating regret matching, blocks of {} games",
                trainer.game().name(),
                block
            );
            trainer.train_alternating(iterations, block)?;
        }
        None => {
            info!("{} with regret matching", trainer.game().name());
            trainer.train(iterations, &[])?;
        }
    }

    trainer.log_summary();
    Ok(())
}
