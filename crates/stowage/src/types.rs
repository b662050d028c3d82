//! Domain types shared by every packing strategy.

use crate::instance::InstanceId;
use crate::totals::utilization_percent;
use crate::units::box_volume_mm3;
use serde::{Deserialize, Serialize};

/// The container to pack into. Lengths in mm, max weight in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInput {
    /// Container identifier.
    pub id: String,
    /// Interior length, mm.
    pub length: f64,
    /// Interior width, mm.
    pub width: f64,
    /// Interior height, mm.
    pub height: f64,
    /// Maximum payload, kg.
    pub max_weight: f64,
}

impl ContainerInput {
    /// Creates a new container.
    pub fn new(id: impl Into<String>, length: f64, width: f64, height: f64, max_weight: f64) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            height,
            max_weight,
        }
    }

    /// Interior volume, mm³.
    pub fn volume_mm3(&self) -> f64 {
        box_volume_mm3(self.length, self.width, self.height)
    }
}

/// A type of item with a quantity of identical physical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    /// Item identifier. May contain the instance separator.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Length, mm.
    pub length: f64,
    /// Width, mm.
    pub width: f64,
    /// Height, mm.
    pub height: f64,
    /// Weight of one unit, kg.
    pub weight: f64,
    /// Number of identical units.
    pub quantity: u32,
    /// Whether the item may be rotated. Advisory: no strategy reads it.
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    /// Color tag used when rendering.
    #[serde(default)]
    pub color: String,
    /// Optional product reference (SKU).
    #[serde(default)]
    pub product_ref: Option<String>,
}

fn default_allow_rotation() -> bool {
    true
}

impl ItemInput {
    /// Creates a new item with quantity 1.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        length: f64,
        width: f64,
        height: f64,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            length,
            width,
            height,
            weight,
            quantity: 1,
            allow_rotation: true,
            color: String::new(),
            product_ref: None,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the color tag.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the product reference.
    pub fn with_product_ref(mut self, product_ref: impl Into<String>) -> Self {
        self.product_ref = Some(product_ref.into());
        self
    }

    /// Sets the advisory rotation flag.
    pub fn with_allow_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Volume of one unit, mm³.
    pub fn unit_volume_mm3(&self) -> f64 {
        box_volume_mm3(self.length, self.width, self.height)
    }
}

/// A point in container space, mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One physical unit successfully placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedItem {
    /// Identifier of the item type.
    pub item_id: String,
    /// Identity of this unit. Numbering is owned by the strategy that placed it.
    pub instance_id: InstanceId,
    /// Display label.
    pub label: String,
    /// Product reference of the item type.
    pub product_ref: Option<String>,
    /// Occupied length after rotation, mm.
    pub rotated_length: f64,
    /// Occupied width after rotation, mm.
    pub rotated_width: f64,
    /// Occupied height after rotation, mm.
    pub rotated_height: f64,
    /// Min corner, container-relative.
    pub position: Position,
    /// Rotation code, 0-5.
    pub rotation: i64,
}

impl PackedItem {
    /// Occupied volume, mm³.
    pub fn volume_mm3(&self) -> f64 {
        box_volume_mm3(self.rotated_length, self.rotated_width, self.rotated_height)
    }
}

/// Outcome of packing one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingResult {
    /// Container identifier.
    pub container_id: String,
    /// Units placed.
    pub packed_items: Vec<PackedItem>,
    /// Item types with units left over; `quantity` is the number that failed.
    pub unfit_items: Vec<ItemInput>,
    /// Equals `packed_items.len()`.
    pub total_packed_items: usize,
    /// Packed volume, m³.
    pub total_packed_volume: f64,
    /// Packed weight, kg.
    pub total_packed_weight: f64,
    /// Packed volume as a percentage of container volume.
    pub volume_utilization: f64,
    /// Packed weight as a percentage of container max weight.
    pub weight_utilization: f64,
    /// True iff `unfit_items` is empty.
    pub is_feasible: bool,
    /// Name of the strategy that produced this result.
    pub strategy: String,
    /// Elapsed computation time, ms.
    pub computation_time_ms: u64,
}

impl PackingResult {
    /// Assembles a result, deriving counts, utilization and feasibility.
    ///
    /// `volume_m3` and `weight_kg` are the already-converted totals.
    pub fn assemble(
        container: &ContainerInput,
        packed_items: Vec<PackedItem>,
        unfit_items: Vec<ItemInput>,
        volume_m3: f64,
        weight_kg: f64,
        strategy: impl Into<String>,
        computation_time_ms: u64,
    ) -> Self {
        let container_volume_m3 = crate::units::mm3_to_m3(container.volume_mm3());
        Self {
            container_id: container.id.clone(),
            total_packed_items: packed_items.len(),
            is_feasible: unfit_items.is_empty(),
            packed_items,
            unfit_items,
            total_packed_volume: volume_m3,
            total_packed_weight: weight_kg,
            volume_utilization: utilization_percent(volume_m3, container_volume_m3),
            weight_utilization: utilization_percent(weight_kg, container.max_weight),
            strategy: strategy.into(),
            computation_time_ms,
        }
    }

    /// Number of units of `item_id` that were placed.
    pub fn packed_count_for(&self, item_id: &str) -> usize {
        self.packed_items
            .iter()
            .filter(|p| p.item_id == item_id)
            .count()
    }

    /// Number of units of `item_id` that did not fit.
    pub fn unfit_count_for(&self, item_id: &str) -> u32 {
        self.unfit_items
            .iter()
            .filter(|u| u.id == item_id)
            .map(|u| u.quantity)
            .sum()
    }

    /// Returns a compact summary of this result.
    pub fn summary(&self) -> PackingSummary {
        PackingSummary::from(self)
    }
}

/// Compact view of a [`PackingResult`] for logs and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingSummary {
    /// Units requested (packed + unfit).
    pub total_requested: usize,
    /// Units packed.
    pub total_packed: usize,
    /// Volume utilization percentage.
    pub volume_utilization: f64,
    /// Weight utilization percentage.
    pub weight_utilization: f64,
    /// Whether everything fit.
    pub is_feasible: bool,
    /// Strategy used.
    pub strategy: String,
    /// Computation time, ms.
    pub time_ms: u64,
}

impl From<&PackingResult> for PackingSummary {
    fn from(result: &PackingResult) -> Self {
        let unfit: usize = result.unfit_items.iter().map(|u| u.quantity as usize).sum();
        Self {
            total_requested: result.total_packed_items + unfit,
            total_packed: result.total_packed_items,
            volume_utilization: result.volume_utilization,
            weight_utilization: result.weight_utilization,
            is_feasible: result.is_feasible,
            strategy: result.strategy.clone(),
            time_ms: result.computation_time_ms,
        }
    }
}
