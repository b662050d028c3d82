//! # Stowage Core
//!
//! Core traits and types for the embedded stowage box-packing library.
//!
//! The library packs individual boxes: it has no notion of quantity, so callers
//! expand multiples into distinct geometries before solving.
//!
//! ## Core Components
//!
//! - **Geometry traits**: [`Geometry`], [`Boundary`]
//! - **Rotation table**: [`ROTATIONS`] and [`rotate`], shared by every consumer
//! - **Solver trait**: [`Solver`] with [`Config`] and [`Strategy`]
//! - **Results**: [`Placement`], [`SolveResult`]
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{rotate, Boundary, Geometry, GeometryId, OrientationMode, ROTATIONS};
pub use placement::Placement;
pub use result::SolveResult;
pub use solver::{Config, Solver, Strategy};

pub use nalgebra::Vector3;
