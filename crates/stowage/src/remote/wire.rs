//! JSON wire format of the packing service.

use crate::types::{ContainerInput, ItemInput};
use serde::{Deserialize, Serialize};

/// Unit system of every request.
pub const UNITS_MM: &str = "mm";

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackRequest {
    /// Always [`UNITS_MM`].
    pub units: String,
    pub container: WireContainer,
    pub items: Vec<WireItem>,
    pub options: PackOptions,
}

impl PackRequest {
    /// Builds the request for one container and its item types.
    ///
    /// Items are sent once per type with their quantity.
    pub fn new(container: &ContainerInput, items: &[ItemInput]) -> Self {
        Self {
            units: UNITS_MM.to_string(),
            container: WireContainer {
                length: container.length,
                width: container.width,
                height: container.height,
                max_weight: container.max_weight,
            },
            items: items.iter().map(WireItem::from).collect(),
            options: PackOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireContainer {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub max_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireItem {
    pub item_id: String,
    pub label: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub quantity: u32,
}

impl From<&ItemInput> for WireItem {
    fn from(item: &ItemInput) -> Self {
        Self {
            item_id: item.id.clone(),
            label: item.label.clone(),
            length: item.length,
            width: item.width,
            height: item.height,
            weight: item.weight,
            quantity: item.quantity,
        }
    }
}

/// Algorithm options. Sent identically on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackOptions {
    pub fix_point: bool,
    pub check_stable: bool,
    pub support_surface_ratio: f64,
    pub bigger_first: bool,
    pub put_type: u8,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            fix_point: true,
            check_stable: true,
            support_surface_ratio: 0.75,
            bigger_first: true,
            put_type: 1,
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<PackData>,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

/// Payload of a successful response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackData {
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub placements: Vec<WirePlacement>,
    #[serde(default)]
    pub unfitted: Vec<WireUnfitted>,
    #[serde(default)]
    pub stats: Option<PackStats>,
}

/// One placed unit. `rotation` is a 0-5 code; `step_number` is the order in
/// which the service would place it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePlacement {
    pub item_id: String,
    #[serde(default)]
    pub label: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub rotation: i64,
    pub step_number: i64,
}

/// Units of one item type that did not fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireUnfitted {
    pub item_id: String,
    #[serde(default)]
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackStats {
    #[serde(default)]
    pub fitted_count: Option<u32>,
    #[serde(default)]
    pub unfitted_count: Option<u32>,
    #[serde(default)]
    pub total_time_ms: Option<f64>,
}

/// Error reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
