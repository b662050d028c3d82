//! Extreme Point placement set for 3D bin packing.
//!
//! Extreme Points are positions where a new box could be placed touching at
//! least two surfaces (walls or other boxes). Every placed box contributes the
//! three points at the far ends of its width, height and depth edges that start
//! at its min corner.
//!
//! Points are kept ordered by (z, y, x), so iteration favours filling the depth
//! axis from the bottom up.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use crate::boundary::Boundary3D;
use crate::geometry::Geometry3D;
use nalgebra::Vector3;
use std::cmp::Ordering;
use stowage_core::geometry::{Boundary, Geometry};
use stowage_core::Placement;

const EPS: f64 = 1e-9;

/// Orders points by z, then y, then x.
fn point_order(a: &Vector3<f64>, b: &Vector3<f64>) -> Ordering {
    a.z.total_cmp(&b.z)
        .then(a.y.total_cmp(&b.y))
        .then(a.x.total_cmp(&b.x))
}

/// Returns true if `point` lies in the half-open interior of the box
/// `[min, min + dims)`.
fn inside(point: &Vector3<f64>, min: &Vector3<f64>, dims: &Vector3<f64>) -> bool {
    (0..3).all(|i| point[i] > min[i] - EPS && point[i] < min[i] + dims[i] - EPS)
}

/// A feasible position and orientation for one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Min corner of the box.
    pub position: Vector3<f64>,
    /// Extents after rotation.
    pub dimensions: Vector3<f64>,
    /// Rotation index used.
    pub orientation: usize,
}

/// Extreme Point set for a single container.
#[derive(Debug, Clone)]
pub struct ExtremePointSet {
    /// Open points, sorted by (z, y, x).
    points: Vec<Vector3<f64>>,
    /// Container extents.
    container: Vector3<f64>,
    /// Container weight limit.
    max_weight: Option<f64>,
    /// Placed boxes.
    placed: Vec<Placement>,
    /// Total placed weight.
    placed_weight: f64,
    /// Max corner of everything placed so far.
    envelope: Vector3<f64>,
}

impl ExtremePointSet {
    /// Creates a new extreme point set for a container.
    pub fn new(boundary: &Boundary3D) -> Self {
        Self {
            points: vec![Vector3::zeros()],
            container: boundary.extents(),
            max_weight: boundary.max_weight(),
            placed: Vec::new(),
            placed_weight: 0.0,
            envelope: Vector3::zeros(),
        }
    }

    /// Returns the number of open extreme points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no extreme point is left open.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the open points in (z, y, x) order.
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Returns the number of placed boxes.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Returns total placed volume.
    pub fn total_volume(&self) -> f64 {
        self.placed.iter().map(Placement::volume).sum()
    }

    /// Returns total placed weight.
    pub fn total_weight(&self) -> f64 {
        self.placed_weight
    }

    /// Returns the container volume not yet occupied.
    pub fn remaining_volume(&self) -> f64 {
        self.container.x * self.container.y * self.container.z - self.total_volume()
    }

    /// Returns the placed boxes.
    pub fn placements(&self) -> &[Placement] {
        &self.placed
    }

    /// Consumes the set, returning the placed boxes in placement order.
    pub fn into_placements(self) -> Vec<Placement> {
        self.placed
    }

    /// Checks whether the weight limit leaves room for `weight` more.
    pub fn accepts_weight(&self, weight: f64) -> bool {
        match self.max_weight {
            Some(max) => self.placed_weight + weight <= max + EPS,
            None => true,
        }
    }

    /// Checks whether a box fits at `position` without leaving the container
    /// or overlapping a placed box.
    pub fn fits(&self, position: &Vector3<f64>, dimensions: &Vector3<f64>) -> bool {
        let within = (0..3).all(|i| position[i] + dimensions[i] <= self.container[i] + EPS);
        if !within {
            return false;
        }

        let probe = Placement::new(String::new(), *position, *dimensions);
        !self.placed.iter().any(|placed| probe.overlaps(placed))
    }

    /// Enumerates feasible candidates for `geom`, in (z, y, x) point order and
    /// then rotation order.
    pub fn candidates<'a>(&'a self, geom: &'a Geometry3D) -> impl Iterator<Item = Candidate> + 'a {
        let weight_ok = self.accepts_weight(geom.weight());
        self.points
            .iter()
            .filter(move |_| weight_ok)
            .flat_map(move |point| {
                geom.allowed_orientations().filter_map(move |orientation| {
                    let dimensions = geom.dimensions_for_orientation(orientation);
                    self.fits(point, &dimensions).then_some(Candidate {
                        position: *point,
                        dimensions,
                        orientation,
                    })
                })
            })
    }

    /// Returns the first feasible candidate.
    pub fn first_fit(&self, geom: &Geometry3D) -> Option<Candidate> {
        self.candidates(geom).next()
    }

    /// Returns the candidate whose placement keeps the occupied envelope
    /// smallest. Ties keep the earliest candidate.
    pub fn best_fit(&self, geom: &Geometry3D) -> Option<Candidate> {
        let mut best: Option<(f64, Candidate)> = None;
        for candidate in self.candidates(geom) {
            let volume = self.envelope_volume_with(&candidate);
            match best {
                Some((best_volume, _)) if volume >= best_volume - EPS => {}
                _ => best = Some((volume, candidate)),
            }
        }
        best.map(|(_, candidate)| candidate)
    }

    /// Volume of the occupied envelope if `candidate` were placed.
    pub fn envelope_volume_with(&self, candidate: &Candidate) -> f64 {
        let corner = candidate.position + candidate.dimensions;
        let envelope = self.envelope.zip_map(&corner, f64::max);
        envelope.x * envelope.y * envelope.z
    }

    /// Places a box at `candidate` and updates the extreme points.
    pub fn place(&mut self, geom: &Geometry3D, candidate: &Candidate, boundary_index: usize) {
        let placement = Placement::new(geom.id().clone(), candidate.position, candidate.dimensions)
            .with_boundary(boundary_index)
            .with_rotation_index(candidate.orientation)
            .with_weight(geom.weight());

        let min = placement.position;
        let dims = placement.dimensions;
        let max = placement.max_corner();

        self.placed_weight += placement.weight;
        self.envelope = self.envelope.zip_map(&max, f64::max);
        self.points.retain(|p| !inside(p, &min, &dims));
        self.placed.push(placement);

        self.add_point(Vector3::new(max.x, min.y, min.z));
        self.add_point(Vector3::new(min.x, max.y, min.z));
        self.add_point(Vector3::new(min.x, min.y, max.z));
    }

    /// Adds a point if it is inside the container, not covered by a placed
    /// box and not already known.
    fn add_point(&mut self, point: Vector3<f64>) {
        if (0..3).any(|i| point[i] >= self.container[i] - EPS) {
            return;
        }

        if self
            .placed
            .iter()
            .any(|placed| inside(&point, &placed.position, &placed.dimensions))
        {
            return;
        }

        if self.points.iter().any(|p| (p - point).norm() < EPS) {
            return;
        }

        let at = self
            .points
            .partition_point(|p| point_order(p, &point) == Ordering::Less);
        self.points.insert(at, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::OrientationMode;

    #[test]
    fn test_extreme_point_set_initial() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0);
        let eps = ExtremePointSet::new(&boundary);

        assert_eq!(eps.len(), 1);
        assert!(!eps.is_empty());
        assert_eq!(eps.placed_count(), 0);
    }

    #[test]
    fn test_place_generates_points() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0);
        let mut eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("B1", 20.0, 30.0, 40.0);

        let candidate = eps.first_fit(&geom).unwrap();
        assert_eq!(candidate.position, Vector3::zeros());
        assert_eq!(candidate.orientation, 0);

        eps.place(&geom, &candidate, 0);

        // The origin is consumed; three new corners open up, ordered (z, y, x).
        assert_eq!(
            eps.points(),
            &[
                Vector3::new(20.0, 0.0, 0.0),
                Vector3::new(0.0, 30.0, 0.0),
                Vector3::new(0.0, 0.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_fits_rejects_overlap_and_overflow() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0);
        let mut eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("B1", 50.0, 50.0, 50.0);
        let candidate = eps.first_fit(&geom).unwrap();
        eps.place(&geom, &candidate, 0);

        let dims = Vector3::new(50.0, 50.0, 50.0);
        assert!(!eps.fits(&Vector3::new(25.0, 0.0, 0.0), &dims));
        assert!(eps.fits(&Vector3::new(50.0, 0.0, 0.0), &dims));
        assert!(!eps.fits(&Vector3::new(60.0, 0.0, 0.0), &dims));
    }

    #[test]
    fn test_no_candidate_for_oversized_box() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0);
        let eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("Big", 200.0, 10.0, 10.0);

        assert!(eps.first_fit(&geom).is_none());
        assert!(eps.best_fit(&geom).is_none());
    }

    #[test]
    fn test_rotation_makes_long_box_fit() {
        let boundary = Boundary3D::new("C", 10.0, 100.0, 10.0);
        let eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("Long", 100.0, 10.0, 10.0);

        let candidate = eps.first_fit(&geom).unwrap();
        assert_eq!(candidate.dimensions, Vector3::new(10.0, 100.0, 10.0));
        assert_eq!(candidate.orientation, 1);

        let fixed = geom.with_orientation(OrientationMode::Fixed);
        assert!(eps.first_fit(&fixed).is_none());
    }

    #[test]
    fn test_weight_limit() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0).with_max_weight(1500.0);
        let mut eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("B1", 10.0, 10.0, 10.0).with_weight(1000.0);

        let candidate = eps.first_fit(&geom).unwrap();
        eps.place(&geom, &candidate, 0);

        assert_eq!(eps.total_weight(), 1000.0);
        assert!(!eps.accepts_weight(1000.0));
        assert!(eps.first_fit(&geom).is_none());
    }

    #[test]
    fn test_best_fit_keeps_envelope_tight() {
        let boundary = Boundary3D::new("C", 100.0, 100.0, 100.0);
        let mut eps = ExtremePointSet::new(&boundary);
        let geom = Geometry3D::new("Cube", 50.0, 50.0, 50.0);

        for _ in 0..4 {
            let candidate = eps.best_fit(&geom).unwrap();
            eps.place(&geom, &candidate, 0);
        }

        // The first four cubes fill the bottom layer before stacking.
        assert!(eps.placements().iter().all(|p| p.position.z == 0.0));
        assert_eq!(eps.remaining_volume(), 500_000.0);
    }
}
