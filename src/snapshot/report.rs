use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::Ranking;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub calculated_at: DateTime<Utc>,
    pub games: usize,
    /// End time of the most recent game with a recorded outcome
    pub latest_game_at: Option<DateTime<Utc>>,
    pub players: usize,
    pub rankings: Ranking,
}

impl RankingReport {
    pub fn new(games: usize, players: usize, rankings: Ranking) -> Self {
        Self {
            calculated_at: Utc::now(),
            games,
            latest_game_at: None,
            players,
            rankings,
        }
    }

    pub fn with_latest_game(mut self, latest_game_at: Option<DateTime<Utc>>) -> Self {
        self.latest_game_at = latest_game_at;
        self
    }
}
