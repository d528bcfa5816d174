use thiserror::Error;

use crate::rating::types::{GameId, PlayerId, Side};

/// Malformed match data handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("game {game_id} has {count} participants, expected exactly 2")]
    WrongParticipantCount { game_id: GameId, count: usize },

    #[error("game {game_id} has both participants on the {side} side")]
    DuplicateSide { game_id: GameId, side: Side },

    #[error("player {player_id} is on both sides of game {game_id}")]
    SelfMatchup { game_id: GameId, player_id: PlayerId },

    #[error("player {player_id} played game {game_id} but has no win/loss tally")]
    MissingTally { player_id: PlayerId, game_id: GameId },

    #[error("player {player_id} has more than one win/loss tally")]
    DuplicateTally { player_id: PlayerId },

    #[error("game {game_id} has no recorded outcome")]
    MissingOutcome { game_id: GameId },

    #[error("game {game_id} names {winner} as winner but its score is {left_score}-{right_score}")]
    ScoreContradictsWinner {
        game_id: GameId,
        winner: Side,
        left_score: u32,
        right_score: u32,
    },

    #[error("outcome recorded for game {game_id}, which has no participants")]
    UnknownGame { game_id: GameId },
}

/// The rating system could not be solved reliably
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingSolveError {
    #[error("rating matrix is singular (affected players: {players:?})")]
    Singular { players: Vec<PlayerId> },

    #[error(
        "rating matrix is ill-conditioned: pivot ratio {ratio:e} is below {tolerance:e} (affected players: {players:?})"
    )]
    IllConditioned {
        ratio: f64,
        tolerance: f64,
        players: Vec<PlayerId>,
    },

    #[error("solving produced a non-finite rating for player {player_id}")]
    NonFinite { player_id: PlayerId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    #[error(transparent)]
    Solve(#[from] RatingSolveError),
}

/// Add context to snapshot read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read snapshot from: {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to report write errors
pub fn write_context(path: &str) -> String {
    format!("Failed to write ranking report to: {}", path)
}
