use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::settings::RatingSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Colley rankings for recorded table games")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compute the ranking for a snapshot of recorded games
    Rank {
        /// Snapshot file (defaults to $RANKINGS_SNAPSHOT, then snapshot.json)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Write the ranking report as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only rank players that appear in at least one game
        #[arg(long)]
        active_only: bool,
        /// Recompute win/loss tallies from recorded outcomes
        #[arg(long)]
        derive_tallies: bool,
        /// Smallest acceptable LU pivot relative to the largest matrix entry
        #[arg(
            long,
            default_value_t = RatingSettings::default().pivot_tolerance,
            value_parser = parse_tolerance
        )]
        pivot_tolerance: f64,
    },
    /// Print the pairwise common-games table
    Matchups {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
    /// Compare supplied win/loss tallies with recorded outcomes
    Audit {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_tolerance(value: &str) -> Result<f64, String> {
    let tolerance: f64 = value
        .parse()
        .map_err(|e| format!("invalid tolerance {value:?}: {e}"))?;
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(format!("tolerance must be a positive finite number, got {value}"))
    }
}
