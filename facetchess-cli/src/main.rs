//! facetchess CLI - text front end for the board engine
//!
//! Commands:
//! - show: print a setup as a board
//! - moves: list the legal moves of one piece
//! - play: apply a sequence of moves
//! - init: write a standard or random setup file

mod init_cmd;
mod moves_cmd;
mod play_cmd;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use facetchess_core::{Board, Setup};

#[derive(Parser)]
#[command(name = "facetchess")]
#[command(about = "Capability-driven 8x8 board engine")]
struct Cli {
    /// Random seed for generated setups
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a setup as a board
    Show {
        /// Setup JSON file (standard layout if omitted)
        #[arg(long, value_name = "FILE")]
        setup: Option<PathBuf>,
    },
    /// List the legal moves of one piece
    Moves(moves_cmd::MovesArgs),
    /// Apply a sequence of moves
    Play(play_cmd::PlayArgs),
    /// Write a setup file
    Init(init_cmd::InitArgs),
}

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { setup } => {
            let board = load_board(setup.as_deref())?;
            print!("{}", render::render_board(&board, &[]));
            Ok(())
        }
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
        Commands::Init(args) => init_cmd::run(args, cli.seed),
    }
}

/// Board from a setup file, or the standard layout
pub(crate) fn load_board(path: Option<&Path>) -> Result<Board> {
    let setup = match path {
        Some(path) => {
            let setup = Setup::load(path)?;
            tracing::debug!("Loaded setup {} from {}", setup.name, path.display());
            setup
        }
        None => Setup::standard(),
    };
    Ok(setup.to_board()?)
}
