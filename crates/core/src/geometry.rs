//! Core geometry traits and the axis-aligned rotation table.

use crate::Result;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a geometry.
pub type GeometryId = String;

/// The six axis-aligned permutations of a box's (width, height, depth).
///
/// Entry `i` lists, for each output axis, which input axis it takes its
/// extent from. Index 0 is the identity.
pub const ROTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2], // (w, h, d)
    [1, 0, 2], // (h, w, d)
    [1, 2, 0], // (h, d, w)
    [2, 1, 0], // (d, h, w)
    [2, 0, 1], // (d, w, h)
    [0, 2, 1], // (w, d, h)
];

/// Applies rotation `code` to a triple of extents.
///
/// Codes outside `0..=5`, including negative ones, leave the triple unchanged.
pub fn rotate<T: Copy>(dims: [T; 3], code: i64) -> [T; 3] {
    match usize::try_from(code).ok().and_then(|i| ROTATIONS.get(i)) {
        Some(axes) => [dims[axes[0]], dims[axes[1]], dims[axes[2]]],
        None => dims,
    }
}

/// Orientation constraint for a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationMode {
    /// Original orientation only (no rotation).
    Fixed,
    /// Any of the 6 axis-aligned orientations.
    #[default]
    AxisAligned,
}

impl OrientationMode {
    /// Returns the number of discrete orientations.
    pub fn count(&self) -> usize {
        match self {
            Self::Fixed => 1,
            Self::AxisAligned => ROTATIONS.len(),
        }
    }

    /// Returns true if rotation is completely fixed.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed)
    }
}

/// A single box that can be packed.
///
/// Geometries carry no quantity: every physical unit is its own geometry.
pub trait Geometry: Clone + Send + Sync {
    /// Returns the unique identifier for this geometry.
    fn id(&self) -> &GeometryId;

    /// Returns the volume of this geometry.
    fn measure(&self) -> f64;

    /// Returns the extents along (width, height, depth).
    fn extents(&self) -> Vector3<f64>;

    /// Returns the weight of this geometry.
    fn weight(&self) -> f64 {
        0.0
    }

    /// Returns the allowed orientations.
    fn orientation(&self) -> OrientationMode {
        OrientationMode::default()
    }

    /// Validates the geometry and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}

/// A container that holds geometries.
pub trait Boundary: Clone + Send + Sync {
    /// Returns the identifier of this boundary.
    fn id(&self) -> &str;

    /// Returns the volume of this boundary.
    fn measure(&self) -> f64;

    /// Returns the extents along (width, height, depth).
    fn extents(&self) -> Vector3<f64>;

    /// Returns the maximum total weight, if limited.
    fn max_weight(&self) -> Option<f64>;

    /// Validates the boundary and returns an error if invalid.
    fn validate(&self) -> Result<()>;

    /// Checks if a box with the given min corner and extents lies inside this boundary.
    fn contains_box(&self, min: &Vector3<f64>, extents: &Vector3<f64>) -> bool {
        let max = self.extents();
        (0..3).all(|i| min[i] >= -1e-9 && min[i] + extents[i] <= max[i] + 1e-9)
    }
}
