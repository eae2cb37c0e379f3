use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How matched items are split into moves and items that stay in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveStrategy {
    /// Keep the largest set of matches that preserved their relative order;
    /// every other match is a move. Produces the fewest moves.
    #[default]
    LongestIncreasing,
    /// Report every match whose rank among all matches differs between the
    /// two snapshots.
    RankShift,
}

/// Configuration for a diff invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// How moves are chosen among matched items.
    pub move_strategy: MoveStrategy,
    /// When `false`, items that would move are reported as a delete plus an
    /// insert, for list views that cannot animate moves.
    pub detect_moves: bool,
    /// When `false`, content equality is never consulted.
    pub detect_updates: bool,
    /// Log a warning when duplicate identities are dropped.
    pub warn_on_duplicates: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            move_strategy: MoveStrategy::LongestIncreasing,
            detect_moves: true,
            detect_updates: true,
            warn_on_duplicates: true,
        }
    }
}

impl DiffConfig {
    /// Configuration that reports moves as delete + insert pairs.
    pub fn without_moves() -> Self {
        Self {
            detect_moves: false,
            ..Default::default()
        }
    }

    /// Use `strategy` to classify moves.
    pub fn with_move_strategy(mut self, strategy: MoveStrategy) -> Self {
        self.move_strategy = strategy;
        self
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.move_strategy, MoveStrategy::LongestIncreasing);
        assert!(c.detect_moves);
        assert!(c.detect_updates);
        assert!(c.warn_on_duplicates);
    }

    #[test]
    fn without_moves_keeps_other_defaults() {
        let c = DiffConfig::without_moves();
        assert!(!c.detect_moves);
        assert!(c.detect_updates);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = DiffConfig::from_toml_str("move_strategy = \"rank-shift\"\ndetect_updates = false\n")
            .unwrap();
        assert_eq!(c.move_strategy, MoveStrategy::RankShift);
        assert!(!c.detect_updates);
        assert!(c.detect_moves);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DiffConfig::from_toml_str("").unwrap(), DiffConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = DiffConfig::from_toml_str("move_strategy = \"sideways\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
