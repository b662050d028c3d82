//! 3D boundary types.

use nalgebra::Vector3;
use stowage_core::geometry::Boundary;
use stowage_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D boundary (container) for bin packing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary3D {
    /// Identifier of the container.
    id: String,

    /// Dimensions (width, height, depth).
    dimensions: Vector3<f64>,

    /// Maximum total weight allowed, in grams.
    max_weight: Option<f64>,
}

impl Boundary3D {
    /// Creates a new 3D boundary with the given dimensions.
    pub fn new(id: impl Into<String>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(width, height, depth),
            max_weight: None,
        }
    }

    /// Sets the maximum allowed weight in grams.
    pub fn with_max_weight(mut self, grams: f64) -> Self {
        self.max_weight = Some(grams);
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
}

impl Boundary for Boundary3D {
    fn id(&self) -> &str {
        &self.id
    }

    fn measure(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    fn extents(&self) -> Vector3<f64> {
        self.dimensions
    }

    fn max_weight(&self) -> Option<f64> {
        self.max_weight
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidBoundary(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }

        if let Some(weight) = self.max_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidBoundary(format!(
                    "Maximum weight for '{}' cannot be negative",
                    self.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_boundary_volume() {
        let boundary = Boundary3D::new("C1", 100.0, 80.0, 50.0);
        assert_relative_eq!(boundary.measure(), 400000.0, epsilon = 0.001);
    }

    #[test]
    fn test_max_weight() {
        let boundary = Boundary3D::new("C1", 100.0, 80.0, 50.0).with_max_weight(1000.0);
        assert_eq!(boundary.max_weight(), Some(1000.0));
        assert_eq!(Boundary3D::new("C2", 1.0, 1.0, 1.0).max_weight(), None);
    }

    #[test]
    fn test_contains_box() {
        let boundary = Boundary3D::new("C1", 100.0, 100.0, 100.0);
        let min = Vector3::new(50.0, 0.0, 0.0);
        assert!(boundary.contains_box(&min, &Vector3::new(50.0, 100.0, 100.0)));
        assert!(!boundary.contains_box(&min, &Vector3::new(51.0, 10.0, 10.0)));
    }

    #[test]
    fn test_validation() {
        let valid = Boundary3D::new("C1", 100.0, 80.0, 50.0);
        assert!(valid.validate().is_ok());

        let invalid = Boundary3D::new("C2", -100.0, 80.0, 50.0);
        assert!(invalid.validate().is_err());

        let negative_weight = Boundary3D::new("C3", 100.0, 80.0, 50.0).with_max_weight(-1.0);
        assert!(negative_weight.validate().is_err());
    }
}
