//! Moves command - list the legal destinations of one piece
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_moves(), report()

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use facetchess_core::{Board, Piece, Position};

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MovesArgs {
    /// Setup JSON file (standard layout if omitted)
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,

    /// Square to inspect, as X,Y
    #[arg(long, value_name = "X,Y")]
    pub at: Position,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// What one piece can do
#[derive(Debug, Serialize)]
struct MovesReport<'a> {
    piece: &'a Piece,
    moves: Vec<Position>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run moves command
pub fn run(args: MovesArgs) -> Result<()> {
    let board = crate::load_board(args.setup.as_deref())?;

    let Some(report) = collect_moves(&board, args.at) else {
        anyhow::bail!("No piece at {}", args.at);
    };

    tracing::info!(
        "{} {} at {} has {} moves",
        report.piece.color(),
        report.piece.name(),
        args.at,
        report.moves.len()
    );

    report_moves(&board, &report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Legal destinations of the piece at `at`, sorted for display
fn collect_moves(board: &Board, at: Position) -> Option<MovesReport<'_>> {
    let piece = board.get_piece(at)?;
    let mut moves = piece.legal_moves(board);
    moves.sort();
    Some(MovesReport { piece, moves })
}

fn report_moves(board: &Board, report: &MovesReport<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let piece = report.piece;
    println!(
        "{} {} at {} ({})",
        piece.color(),
        piece.name(),
        piece.position(),
        piece.capabilities()
    );
    let listed: Vec<String> = report.moves.iter().map(|m| m.to_string()).collect();
    println!("Moves: {}", if listed.is_empty() { "none".to_string() } else { listed.join(" ") });
    println!();
    print!("{}", render_board(board, &report.moves));
    Ok(())
}
