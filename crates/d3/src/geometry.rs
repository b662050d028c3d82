//! 3D box geometry.

use nalgebra::Vector3;
use stowage_core::geometry::{rotate, Geometry, GeometryId, OrientationMode};
use stowage_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single 3D box that can be packed.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry3D {
    /// Unique identifier.
    id: GeometryId,

    /// Dimensions (width, height, depth).
    dimensions: Vector3<f64>,

    /// Weight in grams.
    weight: f64,

    /// Orientation constraint.
    orientation: OrientationMode,
}

impl Geometry3D {
    /// Creates a new 3D box geometry with the given ID and dimensions.
    pub fn new(id: impl Into<GeometryId>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(width, height, depth),
            weight: 0.0,
            orientation: OrientationMode::default(),
        }
    }

    /// Sets the weight in grams.
    pub fn with_weight(mut self, grams: f64) -> Self {
        self.weight = grams;
        self
    }

    /// Sets the orientation constraint.
    pub fn with_orientation(mut self, mode: OrientationMode) -> Self {
        self.orientation = mode;
        self
    }

    /// Returns the dimensions (width, height, depth).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the depth.
    pub fn depth(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the rotation indices this box may be placed in.
    pub fn allowed_orientations(&self) -> std::ops::Range<usize> {
        0..self.orientation.count()
    }

    /// Returns dimensions for a given rotation index.
    pub fn dimensions_for_orientation(&self, orientation: usize) -> Vector3<f64> {
        let code = i64::try_from(orientation).unwrap_or(i64::MAX);
        let [w, h, d] = rotate(
            [self.dimensions.x, self.dimensions.y, self.dimensions.z],
            code,
        );
        Vector3::new(w, h, d)
    }
}

impl Geometry for Geometry3D {
    fn id(&self) -> &GeometryId {
        &self.id
    }

    fn measure(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    fn extents(&self) -> Vector3<f64> {
        self.dimensions
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn orientation(&self) -> OrientationMode {
        self.orientation
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "Weight for '{}' cannot be negative",
                self.id
            )));
        }

        Ok(())
    }
}
