//! gridwalk: watch breadth-first and depth-first search explore a grid.

mod app;
mod ascii;
mod commands;
mod messages;
mod model;
mod screen;
mod term;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gridwalk_core::BoardConfig;
use gridwalk_playback::{PlayOutcome, PlaybackConfig};

use app::{App, AppConfig};
use model::Visualizer;
use term::CrosstermDriver;

/// Interactive BFS/DFS grid search visualizer.
#[derive(Parser, Debug)]
#[command(name = "gridwalk", version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<log::LevelFilter>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a search request (JSON) with the visitation order and parents.
    Solve {
        /// Request file; stdin when omitted or `-`.
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Solve a request and replay the search as ASCII frames.
    Play {
        /// Request file; stdin when omitted or `-`.
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Milliseconds per step (5-200, rounded to 5).
        #[arg(long, default_value_t = PlaybackConfig::DEFAULT_MS)]
        interval: u64,
    },
    /// Edit a grid and animate searches in the terminal.
    Tui {
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(i32).range(2..=200))]
        rows: i32,
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(i32).range(2..=200))]
        cols: i32,
        /// Milliseconds per step (5-200, rounded to 5).
        #[arg(long, default_value_t = PlaybackConfig::DEFAULT_MS)]
        interval: u64,
        /// Do not capture the mouse.
        #[arg(long)]
        no_mouse: bool,
    },
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level {
        builder.filter_level(level);
    }
    if let Some(path) = &cli.log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Solve { input } => {
            let body = commands::read_input(input.as_deref())?;
            commands::solve(&body, &mut io::stdout().lock())?;
        }
        Command::Play { input, interval } => {
            let body = commands::read_input(input.as_deref())?;
            let playback = PlaybackConfig::with_interval_ms(interval);
            let outcome = commands::play(
                &body,
                playback.interval(),
                io::stdout().lock(),
                commands::stdout_is_terminal(),
            )?;
            if let PlayOutcome::Interrupted(i) = outcome {
                log::warn!("playback stopped at {}/{}", i.cursor, i.total);
            }
        }
        Command::Tui {
            rows,
            cols,
            interval,
            no_mouse,
        } => {
            let model = Visualizer::new(
                BoardConfig::with_size(rows, cols),
                PlaybackConfig::with_interval_ms(interval),
            )?;
            let driver = CrosstermDriver::new().with_mouse(!no_mouse);
            let mut app = App::new(AppConfig { model, driver });
            app.run()?;
            log::info!("exited with status {:?}", app.model().status());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("gridwalk: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("gridwalk: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tui_flags() {
        let cli = Cli::try_parse_from([
            "gridwalk",
            "--log-level",
            "debug",
            "tui",
            "--rows",
            "10",
            "--interval",
            "50",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(log::LevelFilter::Debug));
        match cli.command {
            Command::Tui {
                rows,
                cols,
                interval,
                no_mouse,
            } => {
                assert_eq!((rows, cols, interval, no_mouse), (10, 25, 50, false));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_tiny_boards() {
        assert!(Cli::try_parse_from(["gridwalk", "tui", "--rows", "1"]).is_err());
    }
}
