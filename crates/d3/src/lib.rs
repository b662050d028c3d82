//! # Stowage 3D
//!
//! Box packing for the embedded stowage library.
//!
//! Every [`Geometry3D`] is a single physical box; callers that need many
//! identical boxes create one geometry per unit, each with its own id.
//!
//! ## Features
//!
//! - Box geometry with 6-orientation support
//! - Extreme Point placement with first-fit and best-fit decreasing strategies
//! - Container weight limits (grams)
//! - Cooperative cancellation and time limits

pub mod boundary;
pub mod extreme_point;
pub mod geometry;
pub mod packer;

// Re-exports
pub use boundary::Boundary3D;
pub use extreme_point::{Candidate, ExtremePointSet};
pub use geometry::Geometry3D;
pub use packer::Packer3D;
pub use stowage_core::{Config, Error, OrientationMode, Placement, Result, SolveResult, Strategy};
