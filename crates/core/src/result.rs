//! Solve result representation.

use crate::geometry::GeometryId;
use crate::placement::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a packing solve operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// Placements for all successfully placed boxes.
    pub placements: Vec<Placement>,

    /// Number of boundaries that received at least one box.
    pub boundaries_used: usize,

    /// Volume utilization ratio (0.0 - 1.0) over the boundaries used.
    pub utilization: f64,

    /// IDs of geometries that could not be placed, in processing order.
    pub unplaced: Vec<GeometryId>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Strategy used for solving.
    pub strategy: Option<String>,
}

impl SolveResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            boundaries_used: 0,
            utilization: 0.0,
            unplaced: Vec::new(),
            computation_time_ms: 0,
            strategy: None,
        }
    }

    /// Returns true if all geometries were placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed boxes.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced boxes.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Sets the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Returns the indices of boundaries holding at least one box, ascending.
    pub fn used_boundaries(&self) -> Vec<usize> {
        let mut used: Vec<usize> = self.placements.iter().map(|p| p.boundary_index).collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Returns the placements that landed in the given boundary.
    pub fn placements_in(&self, boundary_index: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.boundary_index == boundary_index)
    }
}

impl Default for SolveResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn placement(id: &str, boundary: usize) -> Placement {
        Placement::new(id.to_string(), Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0))
            .with_boundary(boundary)
    }

    #[test]
    fn test_result_new() {
        let result = SolveResult::new();
        assert!(result.placements.is_empty());
        assert_eq!(result.utilization, 0.0);
        assert!(result.all_placed());
        assert!(result.used_boundaries().is_empty());
    }

    #[test]
    fn test_used_boundaries() {
        let mut result = SolveResult::new().with_strategy("BFD");
        result.placements.push(placement("a", 2));
        result.placements.push(placement("b", 0));
        result.placements.push(placement("c", 2));

        assert_eq!(result.used_boundaries(), vec![0, 2]);
        assert_eq!(result.placements_in(2).count(), 2);
        assert_eq!(result.strategy.as_deref(), Some("BFD"));
    }

    #[test]
    fn test_result_with_unplaced() {
        let mut result = SolveResult::new();
        result.unplaced.push("G1".to_string());
        result.unplaced.push("G2".to_string());

        assert!(!result.all_placed());
        assert_eq!(result.unplaced_count(), 2);
        assert_eq!(result.placed_count(), 0);
    }
}
