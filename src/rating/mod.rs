pub mod colley;
pub mod matchups;
pub mod rankings;
pub mod tally;
pub mod types;

pub use colley::ColleySystem;
pub use matchups::{Aggregation, Matchup, MatchupTable, aggregate};
pub use rankings::compute_rankings;
pub use tally::{TallyMismatch, audit_tallies, derive_tallies, with_known_players};
pub use types::{GameOutcome, GameParticipation, Player, PlayerId, RankedPlayer, Ranking, Side, Tally};
