use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::prelude::*;
use tapsweeper_core::*;

mod sim;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Plays seeded minesweeper games with a random player and reports how they went
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Preset board to play on
    #[arg(short, long, value_enum, default_value_t = Level::Easy)]
    difficulty: Level,

    /// Custom board rows, overrides the preset
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many games to play, the board is reset between games
    #[arg(short = 'n', long, default_value_t = 1)]
    games: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => GameConfig::new((rows, cols), mines)
                .context("Invalid custom board"),
            _ => Ok(Difficulty::from(self.difficulty).config()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = args.game_config()?;
    let first_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("config: {:?}, seed: {}", config, first_seed);

    // later boards and the player draw from this, so one seed reproduces the whole run
    let mut seeds = SmallRng::seed_from_u64(first_seed);
    let mut player = SmallRng::seed_from_u64(seeds.random());

    let mut board = Board::new(config, first_seed)?;
    let mut summary = sim::Summary::new(config);
    for game in 0..args.games {
        if game > 0 {
            board.reset(seeds.random());
        }
        let record = sim::play(&mut board, &mut player)?;
        log::info!(
            "Game {} ({:?}): {:?} after {} moves, {} cells revealed",
            game + 1,
            record.seed,
            record.state,
            record.moves,
            record.revealed
        );
        summary.record(record);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let (rows, cols) = config.size;
        println!(
            "{} games on {}x{} with {} mines: {} won, {} lost, {:.1} cells revealed on average",
            summary.games,
            rows,
            cols,
            config.mines,
            summary.wins,
            summary.losses,
            summary.average_revealed
        );
    }

    Ok(())
}
