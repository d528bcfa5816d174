use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use nalgebra::linalg::LU;
use nalgebra::{DMatrix, DVector, Dyn};

use super::matchups::MatchupTable;
use super::types::{PlayerId, RatingValue, Tally};
use crate::config::settings::RatingSettings;
use crate::errors::RatingSolveError;

/// Colley linear system `C · r = b`, indexed by ascending player id
#[derive(Debug, Clone, PartialEq)]
pub struct ColleySystem {
    players: Vec<PlayerId>,
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
}

impl ColleySystem {
    /// Diagonal is `wins + losses + 2`, off-diagonal is minus the common game
    /// count of the pair, right-hand side is `1 + (wins - losses) / 2`.
    pub fn build(matchups: &MatchupTable, tallies: &BTreeMap<PlayerId, Tally>) -> Self {
        let players: Vec<PlayerId> = tallies.keys().copied().collect();
        let n_players = players.len();

        let player_to_idx: HashMap<PlayerId, usize> = players
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut matrix = DMatrix::<f64>::zeros(n_players, n_players);
        let mut rhs = DVector::<f64>::zeros(n_players);

        for (idx, tally) in tallies.values().enumerate() {
            matrix[(idx, idx)] = tally.games() as f64 + 2.0;
            rhs[idx] = 1.0 + (f64::from(tally.wins) - f64::from(tally.losses)) / 2.0;
        }

        for (matchup, common) in matchups.iter() {
            let (a, b) = matchup.players();
            if let (Some(&i), Some(&j)) = (player_to_idx.get(&a), player_to_idx.get(&b)) {
                matrix[(i, j)] = -f64::from(common);
                matrix[(j, i)] = -f64::from(common);
            }
        }

        Self {
            players,
            matrix,
            rhs,
        }
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    pub fn dimension(&self) -> usize {
        self.players.len()
    }

    /// Solves for one rating per player, in player order.
    pub fn solve(
        &self,
        settings: &RatingSettings,
    ) -> Result<Vec<(PlayerId, RatingValue)>, RatingSolveError> {
        if self.players.is_empty() {
            return Ok(Vec::new());
        }

        info!("Solving {0}x{0} rating system", self.dimension());

        let lu = self.matrix.clone().lu();
        self.check_pivots(&lu, settings.pivot_tolerance)?;

        let solution = lu
            .solve(&self.rhs)
            .ok_or_else(|| RatingSolveError::Singular {
                players: self.players.clone(),
            })?;

        self.players
            .iter()
            .zip(solution.iter())
            .map(|(&player_id, &rating)| {
                if rating.is_finite() {
                    Ok((player_id, rating))
                } else {
                    Err(RatingSolveError::NonFinite { player_id })
                }
            })
            .collect()
    }

    /// Partial pivoting keeps columns in place, so pivot k belongs to player k.
    fn check_pivots(
        &self,
        lu: &LU<f64, Dyn, Dyn>,
        tolerance: f64,
    ) -> Result<(), RatingSolveError> {
        let scale = self.matrix.amax();
        let u = lu.u();

        let mut weakest = f64::INFINITY;
        let mut affected = Vec::new();
        for (idx, &player_id) in self.players.iter().enumerate() {
            let ratio = u[(idx, idx)].abs() / scale;
            debug!("Pivot ratio for player {}: {:e}", player_id, ratio);
            weakest = weakest.min(ratio);
            if ratio.is_nan() || ratio < tolerance {
                affected.push(player_id);
            }
        }

        if affected.is_empty() {
            return Ok(());
        }

        warn!(
            "Rating system is degenerate for players {:?} (weakest pivot ratio {:e})",
            affected, weakest
        );

        if weakest == 0.0 || weakest.is_nan() {
            Err(RatingSolveError::Singular { players: affected })
        } else {
            Err(RatingSolveError::IllConditioned {
                ratio: weakest,
                tolerance,
                players: affected,
            })
        }
    }
}
