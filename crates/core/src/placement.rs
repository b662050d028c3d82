//! Placement representation for positioned boxes.

use crate::geometry::GeometryId;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the placement of a single box within a boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the placed geometry.
    pub geometry_id: GeometryId,

    /// Index of the boundary this box is placed in.
    pub boundary_index: usize,

    /// Min corner of the box, relative to the boundary origin.
    pub position: Vector3<f64>,

    /// Extents along (width, height, depth) after rotation.
    pub dimensions: Vector3<f64>,

    /// Index into [`crate::geometry::ROTATIONS`].
    pub rotation_index: usize,

    /// Weight of the placed box.
    pub weight: f64,
}

impl Placement {
    /// Creates a new placement in the first boundary with no rotation.
    pub fn new(geometry_id: GeometryId, position: Vector3<f64>, dimensions: Vector3<f64>) -> Self {
        Self {
            geometry_id,
            boundary_index: 0,
            position,
            dimensions,
            rotation_index: 0,
            weight: 0.0,
        }
    }

    /// Sets the boundary index.
    pub fn with_boundary(mut self, index: usize) -> Self {
        self.boundary_index = index;
        self
    }

    /// Sets the rotation index.
    pub fn with_rotation_index(mut self, index: usize) -> Self {
        self.rotation_index = index;
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the rotated width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the rotated height.
    pub fn height(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the rotated depth.
    pub fn depth(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the max corner of the placed box.
    pub fn max_corner(&self) -> Vector3<f64> {
        self.position + self.dimensions
    }

    /// Returns the occupied volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Checks whether two placed boxes share interior volume.
    ///
    /// Boxes that only touch on a face do not overlap.
    pub fn overlaps(&self, other: &Placement) -> bool {
        let a_max = self.max_corner();
        let b_max = other.max_corner();
        (0..3).all(|i| self.position[i] < b_max[i] - 1e-9 && other.position[i] < a_max[i] - 1e-9)
    }
}
