use std::collections::{BTreeMap, BTreeSet};

use log::info;
use serde::Serialize;

use super::matchups::group_games;
use super::types::{GameOutcome, GameParticipation, Player, PlayerId, Tally};
use crate::errors::DataIntegrityError;

/// Recomputes every player's win/loss tally from recorded game outcomes.
pub fn derive_tallies(
    participations: &[GameParticipation],
    outcomes: &[GameOutcome],
) -> Result<Vec<Player>, DataIntegrityError> {
    let games = group_games(participations)?;
    for outcome in outcomes {
        outcome.check_score()?;
    }
    let winners: BTreeMap<_, _> = outcomes.iter().map(|o| (o.game_id, o.winner)).collect();

    if let Some(&game_id) = winners.keys().find(|id| !games.contains_key(*id)) {
        return Err(DataIntegrityError::UnknownGame { game_id });
    }

    let mut tallies: BTreeMap<PlayerId, Tally> = BTreeMap::new();
    for (&game_id, sides) in &games {
        let winner_side = winners
            .get(&game_id)
            .copied()
            .ok_or(DataIntegrityError::MissingOutcome { game_id })?;

        tallies
            .entry(sides.player_on(winner_side))
            .or_default()
            .wins += 1;
        tallies
            .entry(sides.player_on(winner_side.opposite()))
            .or_default()
            .losses += 1;
    }

    info!("Derived tallies for {} players from {} games", tallies.len(), games.len());

    Ok(tallies
        .into_iter()
        .map(|(id, tally)| Player::new(id, tally.wins, tally.losses))
        .collect())
}

/// Adds a 0/0 tally for every known player that the derived tallies do not mention,
/// so players without games stay in the ranking.
pub fn with_known_players(derived: Vec<Player>, known: &[Player]) -> Vec<Player> {
    let mut merged: BTreeMap<PlayerId, Player> = derived.into_iter().map(|p| (p.id, p)).collect();
    for player in known {
        merged
            .entry(player.id)
            .or_insert_with(|| Player::new(player.id, 0, 0));
    }
    merged.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyMismatch {
    pub player_id: PlayerId,
    pub supplied: Tally,
    pub derived: Tally,
}

/// Players whose supplied tally disagrees with the derived one, ascending by id.
/// A player missing from either list counts as having no wins or losses there.
pub fn audit_tallies(supplied: &[Player], derived: &[Player]) -> Vec<TallyMismatch> {
    let supplied: BTreeMap<PlayerId, Tally> = supplied.iter().map(|p| (p.id, p.tally())).collect();
    let derived: BTreeMap<PlayerId, Tally> = derived.iter().map(|p| (p.id, p.tally())).collect();

    let ids: BTreeSet<PlayerId> = supplied.keys().chain(derived.keys()).copied().collect();

    ids.into_iter()
        .filter_map(|player_id| {
            let supplied = supplied.get(&player_id).copied().unwrap_or_default();
            let derived = derived.get(&player_id).copied().unwrap_or_default();
            (supplied != derived).then_some(TallyMismatch {
                player_id,
                supplied,
                derived,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::types::Side;

    fn participations() -> Vec<GameParticipation> {
        vec![
            GameParticipation::new(1, 10, Side::Left),
            GameParticipation::new(1, 20, Side::Right),
            GameParticipation::new(2, 20, Side::Left),
            GameParticipation::new(2, 30, Side::Right),
            GameParticipation::new(3, 30, Side::Left),
            GameParticipation::new(3, 10, Side::Right),
        ]
    }

    #[test]
    fn test_derives_wins_and_losses() {
        let outcomes = vec![
            GameOutcome::new(1, Side::Left),
            GameOutcome::new(2, Side::Left),
            GameOutcome::new(3, Side::Right),
        ];

        let players = derive_tallies(&participations(), &outcomes).unwrap();

        assert_eq!(
            players,
            vec![
                Player::new(10, 2, 0),
                Player::new(20, 1, 1),
                Player::new(30, 0, 2),
            ]
        );
    }

    #[test]
    fn test_missing_outcome() {
        let outcomes = vec![GameOutcome::new(1, Side::Left), GameOutcome::new(3, Side::Left)];

        let err = derive_tallies(&participations(), &outcomes).unwrap_err();

        assert_eq!(err, DataIntegrityError::MissingOutcome { game_id: 2 });
    }

    #[test]
    fn test_outcome_for_unknown_game() {
        let outcomes = vec![
            GameOutcome::new(1, Side::Left),
            GameOutcome::new(2, Side::Left),
            GameOutcome::new(3, Side::Left),
            GameOutcome::new(7, Side::Right),
        ];

        let err = derive_tallies(&participations(), &outcomes).unwrap_err();

        assert_eq!(err, DataIntegrityError::UnknownGame { game_id: 7 });
    }

    #[test]
    fn test_score_contradicting_winner() {
        let outcomes = vec![
            GameOutcome::new(1, Side::Left).with_score(10, 2),
            GameOutcome::new(2, Side::Left).with_score(4, 10),
            GameOutcome::new(3, Side::Right),
        ];

        let err = derive_tallies(&participations(), &outcomes).unwrap_err();

        assert!(matches!(
            err,
            DataIntegrityError::ScoreContradictsWinner { game_id: 2, .. }
        ));
    }

    #[test]
    fn test_known_players_without_games_are_kept() {
        let derived = vec![Player::new(10, 1, 0), Player::new(20, 0, 1)];
        let known = vec![Player::new(30, 4, 4), Player::new(10, 9, 9)];

        let merged = with_known_players(derived, &known);

        assert_eq!(
            merged,
            vec![
                Player::new(10, 1, 0),
                Player::new(20, 0, 1),
                Player::new(30, 0, 0),
            ]
        );
    }

    #[test]
    fn test_audit_reports_only_disagreements() {
        let supplied = vec![Player::new(1, 3, 1), Player::new(2, 0, 2), Player::new(4, 1, 0)];
        let derived = vec![Player::new(1, 3, 1), Player::new(2, 1, 2), Player::new(3, 0, 1)];

        let mismatches = audit_tallies(&supplied, &derived);

        let ids: Vec<PlayerId> = mismatches.iter().map(|m| m.player_id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(mismatches[1].supplied, Tally::default());
        assert_eq!(mismatches[2].derived, Tally::default());
    }
}
