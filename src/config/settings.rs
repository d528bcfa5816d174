use std::path::PathBuf;

pub const SNAPSHOT_PATH_VAR: &str = "RANKINGS_SNAPSHOT";
const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

#[derive(Debug, Clone)]
pub struct RatingSettings {
    /// Smallest acceptable LU pivot, relative to the largest matrix entry
    pub pivot_tolerance: f64,
    /// Rank players that have a tally but appear in no game
    pub include_idle_players: bool,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-10,
            include_idle_players: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotSettings {
    pub path: PathBuf,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl SnapshotSettings {
    /// Explicit path first, then the environment, then the working directory default
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os(SNAPSHOT_PATH_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        Self { path }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub snapshot: SnapshotSettings,
}

impl AppConfig {
    pub fn new(snapshot: Option<PathBuf>) -> Self {
        Self {
            rating: RatingSettings::default(),
            snapshot: SnapshotSettings::resolve(snapshot),
        }
    }

    pub fn with_rating(mut self, rating: RatingSettings) -> Self {
        self.rating = rating;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_snapshot_path_wins() {
        let settings = SnapshotSettings::resolve(Some(PathBuf::from("games.json")));
        assert_eq!(settings.path, PathBuf::from("games.json"));
    }

    #[test]
    fn test_default_rating_settings() {
        let settings = RatingSettings::default();
        assert!(settings.include_idle_players);
        assert!(settings.pivot_tolerance > 0.0);
    }
}
