//! Play command - apply a sequence of moves to a setup
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_moves(), report_results()
//! - Level 3: TurnOrder - optional White/Black alternation
//!
//! Turn order is a front-end rule: the engine accepts any legal move for
//! any piece, so alternation is enforced here and only with `--turns`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use facetchess_core::{Board, Color, Move};

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Setup JSON file (standard layout if omitted)
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,

    /// Require White and Black to alternate, White first
    #[arg(long)]
    pub turns: bool,

    /// Fail on the first rejected move instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Moves to apply, each as X,Y-X,Y
    #[arg(value_name = "MOVE")]
    pub moves: Vec<Move>,
}

/// Why a move was not applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptySquare,
    OutOfTurn(Color),
    Illegal,
}

/// Outcome of one requested move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub outcome: Result<Option<String>, Rejection>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mut board = crate::load_board(args.setup.as_deref())?;

    tracing::info!("Playing {} moves (turns enforced: {})", args.moves.len(), args.turns);

    let records = play_moves(&mut board, &args.moves, args.turns, args.strict);

    if args.strict {
        if let Some(MoveRecord { mv, outcome: Err(why) }) = records.last() {
            anyhow::bail!("Move {} rejected: {}", mv, describe(*why));
        }
    }

    report_results(&board, &records);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply `moves` in order; rejected moves leave the board unchanged.
///
/// With `strict`, nothing after the first rejection is attempted and that
/// rejection is the last record.
pub fn play_moves(board: &mut Board, moves: &[Move], turns: bool, strict: bool) -> Vec<MoveRecord> {
    let mut order = TurnOrder::new(turns);
    let mut records = Vec::with_capacity(moves.len());

    for &mv in moves {
        let outcome = try_move(board, mv, &mut order);
        match &outcome {
            Ok(Some(victim)) => tracing::info!("{}: captured {}", mv, victim),
            Ok(None) => tracing::info!("{}: ok", mv),
            Err(why) => tracing::warn!("{}: rejected ({:?})", mv, why),
        }
        let rejected = outcome.is_err();
        records.push(MoveRecord { mv, outcome });
        if strict && rejected {
            break;
        }
    }

    records
}

fn report_results(board: &Board, records: &[MoveRecord]) {
    let applied = records.iter().filter(|r| r.outcome.is_ok()).count();
    println!("Applied {} of {} moves", applied, records.len());
    for record in records.iter().filter(|r| r.outcome.is_err()) {
        if let Err(why) = record.outcome {
            println!("  rejected {}: {}", record.mv, describe(why));
        }
    }
    println!();
    print!("{}", render_board(board, &[]));
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Whose move it is, when alternation is enforced
struct TurnOrder {
    enforced: bool,
    current: Color,
}

impl TurnOrder {
    fn new(enforced: bool) -> Self {
        Self {
            enforced,
            current: Color::White,
        }
    }

    fn allows(&self, color: Color) -> bool {
        !self.enforced || color == self.current
    }

    fn advance(&mut self) {
        self.current = self.current.opponent();
    }
}

fn try_move(board: &mut Board, mv: Move, order: &mut TurnOrder) -> Result<Option<String>, Rejection> {
    let mover = board.get_piece(mv.from).ok_or(Rejection::EmptySquare)?;
    if !order.allows(mover.color()) {
        return Err(Rejection::OutOfTurn(order.current));
    }

    let victim = board
        .get_piece(mv.to)
        .map(|p| format!("{} {}", p.color(), p.name()));

    if !board.apply(mv) {
        return Err(Rejection::Illegal);
    }
    order.advance();
    Ok(victim)
}

fn describe(why: Rejection) -> String {
    match why {
        Rejection::EmptySquare => "no piece on the starting square".to_string(),
        Rejection::OutOfTurn(color) => format!("it is {}'s turn", color),
        Rejection::Illegal => "not a legal move for that piece".to_string(),
    }
}
