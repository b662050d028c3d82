//! # Stowage
//!
//! Container packing engine: places box-shaped items inside a single
//! rectangular container and reports what was placed, where, in which
//! orientation, and what did not fit.
//!
//! Two strategies sit behind the one [`Packer`] contract:
//!
//! - [`LocalPacker`]: in-process, built on the embedded `stowage-d3` library
//! - [`RemotePacker`]: delegates to an HTTP packing service through a
//!   [`PackingGateway`]
//!
//! The strategy is chosen once when the [`PackerBackend`] is built.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stowage::{ContainerInput, ItemInput, PackContext, Packer, PackerBackend};
//!
//! let packer = PackerBackend::local();
//! let container = ContainerInput::new("C1", 1200.0, 800.0, 1000.0, 500.0);
//! let items = vec![ItemInput::new("A", "Crate", 300.0, 200.0, 150.0, 4.0).with_quantity(10)];
//!
//! let result = packer.pack(&PackContext::new(), &container, &items)?;
//! println!("{:.1}% of volume used", result.volume_utilization);
//! ```
//!
//! ## Units
//!
//! Lengths are millimeters and weights kilograms at this API. Result totals
//! are reported in m³ and kg.

pub mod config;
pub mod context;
pub mod error;
pub mod instance;
pub mod local;
pub mod packer;
pub mod remote;
pub mod totals;
pub mod types;
pub mod units;

// Re-exports
pub use config::{BackendKind, EngineConfig, GatewayConfig};
pub use context::PackContext;
pub use error::PackingError;
pub use instance::{InstanceId, ParseInstanceIdError, INSTANCE_SEPARATOR};
pub use local::LocalPacker;
pub use packer::{Packer, PackerBackend};
pub use remote::{HttpGateway, PackingGateway, RemotePacker};
pub use totals::{utilization_percent, Totals};
pub use types::{ContainerInput, ItemInput, PackedItem, PackingResult, PackingSummary, Position};
pub use units::rotated_dimensions;
