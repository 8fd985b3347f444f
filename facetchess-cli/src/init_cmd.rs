//! Init command - write a setup file
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_setup()

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use facetchess_core::Setup;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 12345;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct InitArgs {
    /// Where to write the setup JSON
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Generate a mirrored random hybrid army with this many pieces per side
    #[arg(long, value_name = "N")]
    pub random: Option<usize>,

    /// Setup name (defaults to "standard" or "random-<seed>")
    #[arg(long)]
    pub name: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run init command
pub fn run(args: InitArgs, seed: Option<u64>) -> Result<()> {
    let setup = build_setup(&args, seed);

    // Catch bad generated setups before they reach disk
    setup.to_board()?;
    setup.save(&args.output)?;

    tracing::info!(
        "Saved setup {} ({} pieces) to {}",
        setup.name,
        setup.pieces.len(),
        args.output.display()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_setup(args: &InitArgs, seed: Option<u64>) -> Setup {
    let mut setup = match args.random {
        Some(pieces) => {
            let seed = seed.unwrap_or(DEFAULT_SEED);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Setup::random_hybrid(&mut rng, &format!("random-{}", seed), pieces)
        }
        None => Setup::standard(),
    };

    if let Some(name) = &args.name {
        setup.name = name.clone();
    }
    setup
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(random: Option<usize>, name: Option<&str>) -> InitArgs {
        InitArgs {
            output: PathBuf::from("unused.json"),
            random,
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_standard_by_default() {
        let setup = build_setup(&args(None, None), None);
        assert_eq!(setup, Setup::standard());
    }

    #[test]
    fn test_random_uses_seed() {
        let a = build_setup(&args(Some(6), None), Some(9));
        let b = build_setup(&args(Some(6), None), Some(9));
        assert_eq!(a, b);
        assert_eq!(a.name, "random-9");
        assert_eq!(a.pieces.len(), 14);
    }

    #[test]
    fn test_name_override() {
        let setup = build_setup(&args(Some(3), Some("mine")), None);
        assert_eq!(setup.name, "mine");
    }
}
