use proptest::prelude::*;

use colley_rankings::config::settings::RatingSettings;
use colley_rankings::rating::{
    GameOutcome, GameParticipation, Player, PlayerId, Side, aggregate, compute_rankings,
    derive_tallies,
};

type RawGame = (PlayerId, PlayerId, bool);

fn raw_games() -> impl Strategy<Value = Vec<RawGame>> {
    prop::collection::vec((0..8i64, 0..8i64, any::<bool>()), 1..40)
        .prop_map(|games| games.into_iter().filter(|(a, b, _)| a != b).collect())
}

fn build(games: &[RawGame]) -> (Vec<GameParticipation>, Vec<GameOutcome>) {
    let mut participations = Vec::new();
    let mut outcomes = Vec::new();
    for (game_id, &(left, right, left_won)) in (1..).zip(games) {
        participations.push(GameParticipation::new(game_id, left, Side::Left));
        participations.push(GameParticipation::new(game_id, right, Side::Right));
        let winner = if left_won { Side::Left } else { Side::Right };
        outcomes.push(GameOutcome::new(game_id, winner));
    }
    (participations, outcomes)
}

fn consistent_players(games: &[RawGame]) -> (Vec<GameParticipation>, Vec<Player>) {
    let (participations, outcomes) = build(games);
    let players = derive_tallies(&participations, &outcomes).unwrap();
    (participations, players)
}

proptest! {
    #[test]
    fn ranks_are_contiguous_and_unique(games in raw_games()) {
        let (participations, players) = consistent_players(&games);

        let ranking = compute_rankings(&participations, &players, &RatingSettings::default()).unwrap();

        prop_assert_eq!(ranking.len(), players.len());
        let ranks: Vec<u32> = ranking.iter().map(|e| e.rank).collect();
        let expected: Vec<u32> = (1..=players.len() as u32).collect();
        prop_assert_eq!(ranks, expected);
        for player in &players {
            prop_assert!(ranking.get(player.id).is_some());
        }
        prop_assert!(ranking.iter().all(|e| e.rating.is_finite()));
    }

    #[test]
    fn common_games_are_symmetric(games in raw_games()) {
        let (participations, players) = consistent_players(&games);

        let aggregation = aggregate(&participations, &players).unwrap();

        for (matchup, count) in aggregation.matchups.iter() {
            let (a, b) = matchup.players();
            prop_assert_eq!(aggregation.matchups.common_games(a, b), count);
            prop_assert_eq!(aggregation.matchups.common_games(b, a), count);
        }
    }

    #[test]
    fn shuffled_records_rank_identically(
        (games, shuffled) in raw_games().prop_flat_map(|games| {
            let (participations, _) = build(&games);
            (Just(games), Just(participations).prop_shuffle())
        })
    ) {
        let (participations, players) = consistent_players(&games);
        let settings = RatingSettings::default();

        let original = compute_rankings(&participations, &players, &settings).unwrap();
        let permuted = compute_rankings(&shuffled, &players, &settings).unwrap();

        prop_assert_eq!(original, permuted);
    }

    #[test]
    fn repeated_runs_are_bit_identical(games in raw_games()) {
        let (participations, players) = consistent_players(&games);
        let settings = RatingSettings::default();

        let first = compute_rankings(&participations, &players, &settings).unwrap();
        let second = compute_rankings(&participations, &players, &settings).unwrap();

        let first_bits: Vec<u64> = first.iter().map(|e| e.rating.to_bits()).collect();
        let second_bits: Vec<u64> = second.iter().map(|e| e.rating.to_bits()).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_bits, second_bits);
    }
}
