use anyhow::Result;

use colley_rankings::cli::Command;
use colley_rankings::{handle_audit, handle_completions, handle_matchups, handle_rank, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Rank {
            snapshot,
            output,
            active_only,
            derive_tallies,
            pivot_tolerance,
        } => handle_rank(snapshot, output, active_only, derive_tallies, pivot_tolerance),
        Command::Matchups { snapshot } => handle_matchups(snapshot),
        Command::Audit { snapshot } => handle_audit(snapshot),
        Command::Completions { shell } => handle_completions(shell),
    }
}
