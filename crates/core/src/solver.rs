//! Solver trait and configuration.

use crate::geometry::{Boundary, Geometry};
use crate::result::SolveResult;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Largest box first, first feasible extreme point.
    FirstFitDecreasing,
    /// Largest box first, feasible position with the tightest envelope.
    #[default]
    BestFitDecreasing,
}

impl Strategy {
    /// Returns a short name for this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstFitDecreasing => "FFD",
            Self::BestFitDecreasing => "BFD",
        }
    }
}

/// Common configuration for solvers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Packing strategy.
    pub strategy: Strategy,

    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            time_limit_ms: 0,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the packing strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }
}

/// Trait for packing solvers.
pub trait Solver {
    /// The geometry type this solver packs.
    type Geometry: Geometry;
    /// The boundary type this solver packs into.
    type Boundary: Boundary;

    /// Packs the geometries into the boundaries, tried in order.
    fn solve(
        &self,
        geometries: &[Self::Geometry],
        boundaries: &[Self::Boundary],
    ) -> Result<SolveResult>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_strategy(Strategy::FirstFitDecreasing)
            .with_time_limit(250);

        assert_eq!(config.strategy, Strategy::FirstFitDecreasing);
        assert_eq!(config.time_limit_ms, 250);
    }

    #[test]
    fn test_default_strategy_is_best_fit() {
        assert_eq!(Config::default().strategy, Strategy::BestFitDecreasing);
        assert_eq!(Strategy::BestFitDecreasing.name(), "BFD");
    }
}
