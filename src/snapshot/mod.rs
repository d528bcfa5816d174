mod report;

pub use report::RankingReport;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{parse_context, read_context, write_context};
use crate::rating::{GameOutcome, GameParticipation, Player};

/// Everything the engine needs, as exported by the game-recording service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    pub participations: Vec<GameParticipation>,
    #[serde(default)]
    pub outcomes: Vec<GameOutcome>,
}

impl Snapshot {
    /// Number of distinct games referenced by the participations
    pub fn game_count(&self) -> usize {
        let mut ids: Vec<_> = self.participations.iter().map(|p| p.game_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn latest_game_at(&self) -> Option<DateTime<Utc>> {
        self.outcomes.iter().filter_map(|o| o.ended_at).max()
    }
}

/// Load a snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| read_context(&path.display().to_string()))?;

    let snapshot: Snapshot =
        serde_json::from_str(&json).with_context(|| parse_context("snapshot JSON"))?;

    info!(
        "Loaded snapshot {}: {} players, {} participations, {} outcomes",
        path.display(),
        snapshot.players.len(),
        snapshot.participations.len(),
        snapshot.outcomes.len()
    );
    Ok(snapshot)
}

/// Write a ranking report as pretty JSON
pub fn save_report<P: AsRef<Path>>(path: P, report: &RankingReport) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).context("Failed to serialize ranking report")?;

    fs::write(path, json).with_context(|| write_context(&path.display().to_string()))?;

    info!("Saved ranking report: {}", path.display());
    Ok(())
}
