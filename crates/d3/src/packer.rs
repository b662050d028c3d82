//! 3D bin packing solver.

use crate::boundary::Boundary3D;
use crate::extreme_point::{Candidate, ExtremePointSet};
use crate::geometry::Geometry3D;
use stowage_core::geometry::{Boundary, Geometry};
use stowage_core::solver::{Config, Solver, Strategy};
use stowage_core::{Error, Result, SolveResult};

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 3D bin packing solver.
///
/// Boxes are packed largest first. Each box goes into the first boundary that
/// can take it (first fit) or into the fullest boundary that can take it (best
/// fit), at an extreme point of that boundary.
///
/// Every candidate is checked against all boxes already placed, so run time
/// grows roughly with the square of the box count: hundreds of boxes take tens
/// of milliseconds, a thousand takes around a second in release builds. Set
/// [`Config::time_limit_ms`] accordingly for large inputs.
pub struct Packer3D {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl Packer3D {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Shares an external cancellation flag with this packer.
    ///
    /// The flag is never reset by the packer, so a flag raised before
    /// [`Solver::solve`] is called aborts the solve immediately.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_interrupt(&self, start: &Instant) -> Result<()> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        let limit = self.config.time_limit_ms;
        if limit > 0 && start.elapsed().as_millis() > u128::from(limit) {
            return Err(Error::Timeout(limit));
        }
        Ok(())
    }

    /// Returns the boxes largest first; equal volumes keep input order.
    fn packing_order(geometries: &[Geometry3D]) -> Vec<&Geometry3D> {
        let mut order: Vec<&Geometry3D> = geometries.iter().collect();
        order.sort_by(|a, b| {
            b.measure()
                .partial_cmp(&a.measure())
                .unwrap_or(CmpOrdering::Equal)
        });
        order
    }

    fn first_fit(geom: &Geometry3D, sets: &[ExtremePointSet]) -> Option<(usize, Candidate)> {
        sets.iter()
            .enumerate()
            .find_map(|(idx, set)| set.first_fit(geom).map(|c| (idx, c)))
    }

    fn best_fit(geom: &Geometry3D, sets: &[ExtremePointSet]) -> Option<(usize, Candidate)> {
        let mut best: Option<(f64, usize, Candidate)> = None;
        for (idx, set) in sets.iter().enumerate() {
            let Some(candidate) = set.best_fit(geom) else {
                continue;
            };
            let remaining = set.remaining_volume();
            match best {
                Some((best_remaining, _, _)) if remaining >= best_remaining => {}
                _ => best = Some((remaining, idx, candidate)),
            }
        }
        best.map(|(_, idx, candidate)| (idx, candidate))
    }
}

impl Solver for Packer3D {
    type Geometry = Geometry3D;
    type Boundary = Boundary3D;

    fn solve(
        &self,
        geometries: &[Self::Geometry],
        boundaries: &[Self::Boundary],
    ) -> Result<SolveResult> {
        let start = Instant::now();

        if boundaries.is_empty() {
            return Err(Error::ConfigError(
                "at least one boundary is required".into(),
            ));
        }
        for boundary in boundaries {
            boundary.validate()?;
        }
        for geom in geometries {
            geom.validate()?;
        }

        let strategy = self.config.strategy;
        let mut sets: Vec<ExtremePointSet> = boundaries.iter().map(ExtremePointSet::new).collect();
        let mut result = SolveResult::new().with_strategy(strategy.name());

        for geom in Self::packing_order(geometries) {
            self.check_interrupt(&start)?;

            let choice = match strategy {
                Strategy::FirstFitDecreasing => Self::first_fit(geom, &sets),
                Strategy::BestFitDecreasing => Self::best_fit(geom, &sets),
            };

            match choice {
                Some((idx, candidate)) => sets[idx].place(geom, &candidate, idx),
                None => result.unplaced.push(geom.id().clone()),
            }
        }

        let used: Vec<&Boundary3D> = boundaries
            .iter()
            .zip(&sets)
            .filter(|(_, set)| set.placed_count() > 0)
            .map(|(boundary, _)| boundary)
            .collect();
        let used_volume: f64 = used.iter().map(|b| b.measure()).sum();
        let placed_volume: f64 = sets.iter().map(ExtremePointSet::total_volume).sum();

        result.boundaries_used = used.len();
        result.utilization = if used_volume > 0.0 {
            placed_volume / used_volume
        } else {
            0.0
        };
        result.placements = sets
            .into_iter()
            .flat_map(ExtremePointSet::into_placements)
            .collect();
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "{} packed {}/{} boxes into {} boundaries in {}ms",
            strategy.name(),
            result.placed_count(),
            geometries.len(),
            result.boundaries_used,
            result.computation_time_ms
        );

        Ok(result)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
