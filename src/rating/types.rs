use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DataIntegrityError;

pub type PlayerId = i64;
pub type GameId = i64;
pub type RatingValue = f64;

/// Side of the table a participant played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player with the win/loss counters accumulated over their recorded history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub wins: u32,
    pub losses: u32,
}

impl Player {
    pub fn new(id: PlayerId, wins: u32, losses: u32) -> Self {
        Self { id, wins, losses }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            wins: self.wins,
            losses: self.losses,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
}

impl Tally {
    pub fn games(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }
}

/// One player's appearance in a recorded game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParticipation {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub side: Side,
}

impl GameParticipation {
    pub fn new(game_id: GameId, player_id: PlayerId, side: Side) -> Self {
        Self {
            game_id,
            player_id,
            side,
        }
    }
}

/// Result of a completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub game_id: GameId,
    pub winner: Side,
    #[serde(default)]
    pub left_score: Option<u32>,
    #[serde(default)]
    pub right_score: Option<u32>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameOutcome {
    pub fn new(game_id: GameId, winner: Side) -> Self {
        Self {
            game_id,
            winner,
            left_score: None,
            right_score: None,
            ended_at: None,
        }
    }

    pub fn with_score(mut self, left_score: u32, right_score: u32) -> Self {
        self.left_score = Some(left_score);
        self.right_score = Some(right_score);
        self
    }

    /// A recorded score must agree with the named winner
    pub fn check_score(&self) -> Result<(), DataIntegrityError> {
        let (Some(left_score), Some(right_score)) = (self.left_score, self.right_score) else {
            return Ok(());
        };
        let consistent = match self.winner {
            Side::Left => left_score > right_score,
            Side::Right => right_score > left_score,
        };
        if consistent {
            Ok(())
        } else {
            Err(DataIntegrityError::ScoreContradictsWinner {
                game_id: self.game_id,
                winner: self.winner,
                left_score,
                right_score,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub rank: u32,
    pub rating: RatingValue,
}

/// Players in rank order, rank 1 first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankedPlayer>,
}

impl Ranking {
    /// Orders ratings best first. Equal ratings fall back to ascending player id,
    /// so every player gets a distinct rank.
    pub fn from_ratings(ratings: Vec<(PlayerId, RatingValue)>) -> Self {
        // -0.0 and 0.0 compare equal and must reach the id tie-break
        let mut ratings: Vec<(PlayerId, RatingValue)> = ratings
            .into_iter()
            .map(|(id, rating)| (id, if rating == 0.0 { 0.0 } else { rating }))
            .collect();
        ratings.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let entries = ratings
            .into_iter()
            .zip(1..)
            .map(|((player_id, rating), rank)| RankedPlayer {
                player_id,
                rank,
                rating,
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedPlayer> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[RankedPlayer] {
        &self.entries
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&RankedPlayer> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    /// Rank to store back on the player record
    pub fn rank_of(&self, player_id: PlayerId) -> Option<u32> {
        self.get(player_id).map(|e| e.rank)
    }

    pub fn leader(&self) -> Option<&RankedPlayer> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_side_serializes_capitalized() {
        let json = serde_json::to_string(&Side::Left).unwrap();
        assert_eq!(json, "\"Left\"");
    }

    #[test]
    fn test_ranking_breaks_ties_by_player_id() {
        let ranking = Ranking::from_ratings(vec![(9, 0.5), (4, 0.75), (2, 0.5)]);

        let order: Vec<PlayerId> = ranking.iter().map(|e| e.player_id).collect();
        assert_eq!(order, vec![4, 2, 9]);

        let ranks: Vec<u32> = ranking.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_signed_zero_ratings_tie_on_player_id() {
        let ranking = Ranking::from_ratings(vec![(5, 0.0), (3, -0.0), (8, -0.25)]);

        let order: Vec<PlayerId> = ranking.iter().map(|e| e.player_id).collect();
        assert_eq!(order, vec![3, 5, 8]);
        assert!(ranking.iter().take(2).all(|e| e.rating.is_sign_positive()));
    }

    #[test]
    fn test_tally_games_does_not_overflow() {
        let tally = Tally {
            wins: u32::MAX,
            losses: u32::MAX,
        };
        assert_eq!(tally.games(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_score_must_agree_with_winner() {
        assert!(GameOutcome::new(1, Side::Left).check_score().is_ok());
        assert!(GameOutcome::new(1, Side::Left).with_score(10, 7).check_score().is_ok());
        assert!(GameOutcome::new(1, Side::Right).with_score(3, 10).check_score().is_ok());

        let err = GameOutcome::new(4, Side::Right)
            .with_score(10, 7)
            .check_score()
            .unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::ScoreContradictsWinner {
                game_id: 4,
                winner: Side::Right,
                left_score: 10,
                right_score: 7
            }
        );
    }

    #[test]
    fn test_rank_of_unknown_player() {
        let ranking = Ranking::from_ratings(vec![(1, 0.6)]);

        assert_eq!(ranking.rank_of(1), Some(1));
        assert_eq!(ranking.rank_of(2), None);
        assert_eq!(ranking.leader().map(|e| e.player_id), Some(1));
    }
}
