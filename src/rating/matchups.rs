use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use super::types::{GameId, GameParticipation, Player, PlayerId, Side, Tally};
use crate::errors::DataIntegrityError;

/// Unordered pair of players, stored lower id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Matchup {
    low: PlayerId,
    high: PlayerId,
}

impl Matchup {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn players(&self) -> (PlayerId, PlayerId) {
        (self.low, self.high)
    }
}

/// The two participants of a validated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSides {
    pub left: PlayerId,
    pub right: PlayerId,
}

impl GameSides {
    pub fn player_on(&self, side: Side) -> PlayerId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn matchup(&self) -> Matchup {
        Matchup::new(self.left, self.right)
    }
}

/// Number of games each pair of players has in common
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupTable {
    common_games: BTreeMap<Matchup, u32>,
}

impl MatchupTable {
    /// Zero when the pair never appeared together. Argument order does not matter.
    pub fn common_games(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.common_games
            .get(&Matchup::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, a: PlayerId, b: PlayerId) -> bool {
        self.common_games.contains_key(&Matchup::new(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Matchup, u32)> + '_ {
        self.common_games.iter().map(|(&m, &count)| (m, count))
    }

    pub fn len(&self) -> usize {
        self.common_games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.common_games.is_empty()
    }

    fn with(mut self, matchup: Matchup, count: u32) -> Self {
        self.common_games.insert(matchup, count);
        self
    }
}

/// Aggregator output: pairwise table plus the tallies of everyone who played
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub matchups: MatchupTable,
    /// Tallies of players appearing in at least one game
    pub tallies: BTreeMap<PlayerId, Tally>,
    /// Tallies supplied for players that appear in no game
    pub idle: BTreeMap<PlayerId, Tally>,
}

/// Builds the pairwise interaction table from raw participations.
///
/// Games are checked in ascending id order, so the first integrity error
/// reported is the same whatever order the participations arrive in.
pub fn aggregate(
    participations: &[GameParticipation],
    players: &[Player],
) -> Result<Aggregation, DataIntegrityError> {
    info!(
        "Aggregating {} participations for {} players",
        participations.len(),
        players.len()
    );

    let games = group_games(participations)?;
    let histories = build_histories(&games);
    let mut supplied = index_tallies(players)?;

    let matchups = games
        .values()
        .map(GameSides::matchup)
        .fold(MatchupTable::default(), |table, matchup| {
            if table.contains(matchup.low, matchup.high) {
                return table;
            }
            let count = count_common_games(&histories, matchup);
            table.with(matchup, count)
        });

    let mut tallies = BTreeMap::new();
    for (&player_id, history) in &histories {
        let tally = supplied
            .remove(&player_id)
            .ok_or_else(|| missing_tally(player_id, history))?;
        tallies.insert(player_id, tally);
    }

    info!(
        "Found {} matchups between {} players ({} idle)",
        matchups.len(),
        tallies.len(),
        supplied.len()
    );

    Ok(Aggregation {
        matchups,
        tallies,
        idle: supplied,
    })
}

/// Groups participations by game and checks each game is a proper two-sided pairing
pub fn group_games(
    participations: &[GameParticipation],
) -> Result<BTreeMap<GameId, GameSides>, DataIntegrityError> {
    let mut grouped: BTreeMap<GameId, Vec<&GameParticipation>> = BTreeMap::new();
    for participation in participations {
        grouped
            .entry(participation.game_id)
            .or_default()
            .push(participation);
    }

    grouped
        .into_iter()
        .map(|(game_id, members)| validate_game(game_id, &members).map(|sides| (game_id, sides)))
        .collect()
}

fn validate_game(
    game_id: GameId,
    members: &[&GameParticipation],
) -> Result<GameSides, DataIntegrityError> {
    let [first, second] = members else {
        return Err(DataIntegrityError::WrongParticipantCount {
            game_id,
            count: members.len(),
        });
    };

    if first.player_id == second.player_id {
        return Err(DataIntegrityError::SelfMatchup {
            game_id,
            player_id: first.player_id,
        });
    }

    match (first.side, second.side) {
        (Side::Left, Side::Right) => Ok(GameSides {
            left: first.player_id,
            right: second.player_id,
        }),
        (Side::Right, Side::Left) => Ok(GameSides {
            left: second.player_id,
            right: first.player_id,
        }),
        (side, _) => Err(DataIntegrityError::DuplicateSide { game_id, side }),
    }
}

fn build_histories(games: &BTreeMap<GameId, GameSides>) -> BTreeMap<PlayerId, BTreeSet<GameId>> {
    let mut histories: BTreeMap<PlayerId, BTreeSet<GameId>> = BTreeMap::new();
    for (&game_id, sides) in games {
        histories.entry(sides.left).or_default().insert(game_id);
        histories.entry(sides.right).or_default().insert(game_id);
    }
    histories
}

/// Overlap of the two players' whole game histories
fn count_common_games(
    histories: &BTreeMap<PlayerId, BTreeSet<GameId>>,
    matchup: Matchup,
) -> u32 {
    let (a, b) = matchup.players();
    let count = match (histories.get(&a), histories.get(&b)) {
        (Some(games_a), Some(games_b)) => games_a.intersection(games_b).count(),
        _ => 0,
    };
    debug!("Players {} and {} share {} games", a, b, count);
    count as u32
}

fn index_tallies(players: &[Player]) -> Result<BTreeMap<PlayerId, Tally>, DataIntegrityError> {
    let mut tallies = BTreeMap::new();
    for player in players {
        if tallies.insert(player.id, player.tally()).is_some() {
            return Err(DataIntegrityError::DuplicateTally {
                player_id: player.id,
            });
        }
    }
    Ok(tallies)
}

fn missing_tally(player_id: PlayerId, history: &BTreeSet<GameId>) -> DataIntegrityError {
    DataIntegrityError::MissingTally {
        player_id,
        game_id: history.first().copied().unwrap_or_default(),
    }
}
