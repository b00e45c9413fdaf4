//! Alpha-NoGo: a NoGo agent for judge platforms.
//!
//! ## Usage
//!
//! - `alpha-nogo` - Play in long-running mode on stdin/stdout
//! - `alpha-nogo play --mode batch` - Answer one turn from a full transcript
//! - `alpha-nogo show` - Replay a transcript from stdin and print the board

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

use alpha_nogo::board::{Board, CellState};
use alpha_nogo::constants::N;
use alpha_nogo::controller::TurnController;
use alpha_nogo::history::MoveHistory;
use alpha_nogo::policy::RandomPolicy;
use alpha_nogo::protocol::{BatchReplay, ExitCode, ProtocolReader, RunMode};
use alpha_nogo::rules::legal_moves;

/// Alpha-NoGo: a NoGo agent speaking the judge's JSON protocol
#[derive(Parser)]
#[command(name = "alpha-nogo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play turns read from stdin, answering on stdout
    Play(PlayArgs),
    /// Replay a full transcript from stdin and print the resulting board
    Show,
}

#[derive(Args, Default)]
struct PlayArgs {
    /// How the host runs this process
    #[arg(long, value_enum, default_value_t = RunMode::LongRunning)]
    mode: RunMode,

    /// Seed for the move policy
    #[arg(long)]
    seed: Option<u64>,

    /// Expected board size; must match the compiled size
    #[arg(long)]
    board_size: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let code = match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Show) => match show() {
            Ok(()) => ExitCode::Ok,
            Err(e) => {
                error!("{e:#}");
                ExitCode::JsonParsingError
            }
        },
        None => play(PlayArgs::default()),
    };
    if code != ExitCode::Ok {
        process::exit(code.as_i32());
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    // stdout belongs to the judge protocol
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level))
        .target(env_logger::Target::Stderr)
        .write_style(env_logger::WriteStyle::Never)
        .init();
}

fn play(args: PlayArgs) -> ExitCode {
    if let Some(size) = args.board_size {
        if size != N {
            error!("unacceptable size, only {N} is supported (got {size})");
            return ExitCode::InvalidBoardSize;
        }
    }

    let policy = match args.seed {
        Some(seed) => RandomPolicy::with_seed(seed),
        None => RandomPolicy::new(),
    };
    info!("starting in {:?} mode", args.mode);

    let mut controller = TurnController::new(args.mode, Box::new(policy));
    let stdin = io::stdin();
    let stdout = io::stdout();
    match controller.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::Ok,
        Err(e) => {
            error!("fatal: {e}");
            e.exit_code()
        }
    }
}

fn show() -> Result<()> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read transcript")?;
    if line.trim().is_empty() {
        bail!("no transcript on stdin");
    }

    let mut board = Board::new();
    let mut history = MoveHistory::new();
    BatchReplay::new()
        .read_turn(line.trim(), &mut history, &mut board)
        .context("failed to replay transcript")?;

    let mine = legal_moves(&mut board, CellState::Mine).len();
    let enemy = legal_moves(&mut board, CellState::Enemy).len();

    let mut out = io::stdout().lock();
    writeln!(out, "{board}")?;
    writeln!(out, "hand order: {:?}", history.hand_order())?;
    writeln!(out, "legal moves: X {mine}, O {enemy}")?;
    Ok(())
}
