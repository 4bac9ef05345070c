//! pipemaze: find the fewest tile rotations that connect S to E.
//!
//! Boards are read from a file (or stdin with `-`), one row per line, in
//! the box-drawing glyphs `═ ║ ╔ ╗ ╚ ╝ ╠ ╣ ╦ ╩ ╬`, with `S` for the Start,
//! `E` for an End and a space for a brick. `--random` generates a board
//! instead.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};

use pipemaze_core::Board;
use pipemaze_gen::{BoardGen, GenConfig};
use pipemaze_paths::{NoObserver, Outcome, solve};
use pipemaze_term::{TermConfig, TermObserver, render_board, summary};

/// Largest side accepted for a random board.
const MAX_SIDE: i64 = 1024;

#[derive(Debug, Parser)]
#[command(name = "pipemaze", version, about)]
struct Cli {
    /// Board file; `-` reads stdin
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Generate a random board instead of reading one
    #[arg(short, long)]
    random: bool,

    /// Width of a random board
    #[arg(
        long,
        default_value_t = GenConfig::default().width,
        value_parser = clap::value_parser!(i32).range(1..=MAX_SIDE)
    )]
    width: i32,

    /// Height of a random board
    #[arg(
        long,
        default_value_t = GenConfig::default().height,
        value_parser = clap::value_parser!(i32).range(1..=MAX_SIDE)
    )]
    height: i32,

    /// Seed for the random board and scrambling
    #[arg(long)]
    seed: Option<u64>,

    /// Turn every tile a random number of times before solving
    #[arg(long)]
    scramble: bool,

    /// Redraw the board for every path state the search processes
    #[arg(short, long)]
    animate: bool,

    /// Pause between animation frames, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay: u64,

    /// Plain glyphs, no colours
    #[arg(long)]
    no_color: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn term_config(&self) -> TermConfig {
        TermConfig {
            color: !self.no_color,
            delay: Duration::from_millis(self.delay),
        }
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_board(path: &Path) -> Result<Board, Box<dyn Error>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(text.parse()?)
}

/// Turn every tile 0 to 3 times.
fn scramble<R: Rng>(board: &mut Board, rng: &mut R) {
    for p in board.range() {
        for _ in 0..rng.random_range(0..4) {
            board.rotate(p);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut bg = BoardGen::new(cli.rng());
    let mut board = match &cli.file {
        Some(path) => read_board(path)?,
        None => bg.generate(&GenConfig {
            width: cli.width,
            height: cli.height,
        }),
    };
    if cli.scramble {
        scramble(&mut board, &mut bg.rng);
    }
    log::info!("board {}x{}", board.width(), board.height());

    let cfg = cli.term_config();
    let outcome = if cli.animate {
        let mut obs = TermObserver::new(io::stdout(), &board, cfg);
        let outcome = solve(&board, &mut obs)?;
        obs.finish()?;
        outcome
    } else {
        solve(&board, &mut NoObserver)?
    };

    let mut out = io::stdout();
    match &outcome {
        Outcome::Solved(s) => render_board(&mut out, &board, &s.path, &cfg)?,
        Outcome::Unsolvable => render_board(&mut out, &board, &[], &cfg)?,
    }
    println!("{}", summary(&outcome));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_or_random() {
        let cli = Cli::try_parse_from(["pipemaze", "board.txt"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("board.txt")));
        assert!(!cli.random);

        let cli = Cli::try_parse_from(["pipemaze", "-r", "--width", "5", "--seed", "9"]).unwrap();
        assert!(cli.random);
        assert_eq!((cli.width, cli.height), (5, 8));
        assert_eq!(cli.seed, Some(9));

        assert!(Cli::try_parse_from(["pipemaze"]).is_err());
        assert!(Cli::try_parse_from(["pipemaze", "-r", "board.txt"]).is_err());
    }

    #[test]
    fn random_sizes_bounded() {
        assert!(Cli::try_parse_from(["pipemaze", "-r", "--width", "70000"]).is_err());
        assert!(Cli::try_parse_from(["pipemaze", "-r", "--height", "0"]).is_err());
        assert!(Cli::try_parse_from(["pipemaze", "-r", "--height", "-2"]).is_err());
        let cli = Cli::try_parse_from(["pipemaze", "-r", "--width", "1024"]).unwrap();
        assert_eq!(cli.width, 1024);
    }

    #[test]
    fn unseeded_rng_generates() {
        let cli = Cli::try_parse_from(["pipemaze", "-r", "--width", "3", "--height", "2"]).unwrap();
        let board = BoardGen::new(cli.rng()).generate(&GenConfig {
            width: cli.width,
            height: cli.height,
        });
        assert_eq!((board.width(), board.height()), (3, 2));
    }

    #[test]
    fn term_config_from_flags() {
        let cli = Cli::try_parse_from(["pipemaze", "-r", "--no-color", "--delay", "0", "-vv"]).unwrap();
        let cfg = cli.term_config();
        assert!(!cfg.color);
        assert!(cfg.delay.is_zero());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn scramble_keeps_shapes() {
        let board: Board = "S═╗\n ╔╝\n ╚E".parse().unwrap();
        let mut scrambled = board.clone();
        scramble(&mut scrambled, &mut SmallRng::seed_from_u64(5));
        for ((_, a), (_, b)) in board.iter().zip(scrambled.iter()) {
            assert_eq!(a.rotations().len(), b.rotations().len());
            assert!(a.is_brick() || a.rotations().contains(&b.openings()));
        }
        assert!(solve(&scrambled, &mut NoObserver).unwrap().is_solved());
    }
}
