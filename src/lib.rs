pub mod cli;
pub mod config;
pub mod errors;
pub mod rating;
pub mod services;
pub mod snapshot;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::settings::{AppConfig, RatingSettings};
use crate::services::ranking::{RankingService, TallySource};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_rank(
    snapshot: Option<PathBuf>,
    output: Option<PathBuf>,
    active_only: bool,
    derive_tallies: bool,
    pivot_tolerance: f64,
) -> Result<()> {
    let rating = RatingSettings {
        pivot_tolerance,
        include_idle_players: !active_only,
    };
    let config = AppConfig::new(snapshot).with_rating(rating);
    let tallies = if derive_tallies {
        TallySource::Outcomes
    } else {
        TallySource::Snapshot
    };

    let service = RankingService::new(config);
    service.run(tallies, output.as_deref())
}

pub fn handle_matchups(snapshot: Option<PathBuf>) -> Result<()> {
    let service = RankingService::new(AppConfig::new(snapshot));
    service.matchups()
}

pub fn handle_audit(snapshot: Option<PathBuf>) -> Result<()> {
    let service = RankingService::new(AppConfig::new(snapshot));
    let mismatches = service.audit()?;
    if !mismatches.is_empty() {
        bail!("{} player tallies disagree with recorded outcomes", mismatches.len());
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
