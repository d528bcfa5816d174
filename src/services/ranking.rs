use anyhow::{Context, Result};
use colored::Colorize;
use log::{info, warn};
use std::path::Path;

use crate::config::settings::AppConfig;
use crate::rating::{self, MatchupTable, Ranking, TallyMismatch};
use crate::snapshot::{self, RankingReport, Snapshot};

/// Where the players' win/loss tallies come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallySource {
    Snapshot,
    Outcomes,
}

pub struct RankingService {
    config: AppConfig,
}

impl RankingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, tallies: TallySource, output: Option<&Path>) -> Result<()> {
        info!("=== Computing Rankings ===");

        let snapshot = self.load()?;
        let ranking = self.rank(&snapshot, tallies)?;
        print_ranking(&ranking);

        if let Some(path) = output {
            let report = RankingReport::new(snapshot.game_count(), ranking.len(), ranking)
                .with_latest_game(snapshot.latest_game_at());
            snapshot::save_report(path, &report)?;
        }

        info!("=== Rankings Complete ===");
        Ok(())
    }

    pub fn rank(&self, snapshot: &Snapshot, tallies: TallySource) -> Result<Ranking> {
        let derived;
        let players = match tallies {
            TallySource::Snapshot => &snapshot.players,
            TallySource::Outcomes => {
                let from_outcomes =
                    rating::derive_tallies(&snapshot.participations, &snapshot.outcomes)
                        .context("Failed to derive tallies from outcomes")?;
                derived = rating::with_known_players(from_outcomes, &snapshot.players);
                &derived
            }
        };

        rating::compute_rankings(&snapshot.participations, players, &self.config.rating)
            .context("Failed to compute rankings")
    }

    pub fn matchups(&self) -> Result<()> {
        let snapshot = self.load()?;
        let aggregation = rating::aggregate(&snapshot.participations, &snapshot.players)
            .context("Failed to aggregate matchups")?;

        print_matchups(&aggregation.matchups);
        Ok(())
    }

    pub fn audit(&self) -> Result<Vec<TallyMismatch>> {
        let snapshot = self.load()?;
        let derived = rating::derive_tallies(&snapshot.participations, &snapshot.outcomes)
            .context("Failed to derive tallies from outcomes")?;

        let mismatches = rating::audit_tallies(&snapshot.players, &derived);
        if mismatches.is_empty() {
            info!("All {} tallies match recorded outcomes", derived.len());
        } else {
            warn!("{} tallies disagree with recorded outcomes", mismatches.len());
        }

        print_mismatches(&mismatches);
        Ok(mismatches)
    }

    fn load(&self) -> Result<Snapshot> {
        snapshot::load_snapshot(&self.config.snapshot.path)
    }
}

fn print_ranking(ranking: &Ranking) {
    println!("{}", format!("{:>5}  {:>10}  {:>10}", "rank", "player", "rating").bold());
    for entry in ranking.iter() {
        let line = format!("{:>5}  {:>10}  {:>10.4}", entry.rank, entry.player_id, entry.rating);
        if entry.rank == 1 {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line);
        }
    }
}

fn print_matchups(matchups: &MatchupTable) {
    println!("{}", format!("{:>10}  {:>10}  {:>8}", "player", "opponent", "games").bold());
    for (matchup, common) in matchups.iter() {
        let (a, b) = matchup.players();
        println!("{:>10}  {:>10}  {:>8}", a, b, common);
    }
}

fn print_mismatches(mismatches: &[TallyMismatch]) {
    for mismatch in mismatches {
        println!(
            "{} player {}: supplied {}W/{}L, outcomes give {}W/{}L",
            "mismatch".yellow().bold(),
            mismatch.player_id,
            mismatch.supplied.wins,
            mismatch.supplied.losses,
            mismatch.derived.wins,
            mismatch.derived.losses
        );
    }
}
