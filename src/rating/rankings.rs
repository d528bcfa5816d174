use log::info;

use super::colley::ColleySystem;
use super::matchups::aggregate;
use super::types::{GameParticipation, Player, Ranking};
use crate::config::settings::RatingSettings;
use crate::errors::RankingError;

/// Turns a snapshot of game participations and player tallies into a ranking.
///
/// Inputs are only read. Either a complete ranking comes back or an error does,
/// never a partial one.
pub fn compute_rankings(
    participations: &[GameParticipation],
    players: &[Player],
    settings: &RatingSettings,
) -> Result<Ranking, RankingError> {
    let aggregation = aggregate(participations, players)?;

    let mut tallies = aggregation.tallies;
    if settings.include_idle_players {
        tallies.extend(aggregation.idle);
    }

    let system = ColleySystem::build(&aggregation.matchups, &tallies);
    let ratings = system.solve(settings)?;
    let ranking = Ranking::from_ratings(ratings);

    info!("Ranked {} players", ranking.len());
    Ok(ranking)
}
