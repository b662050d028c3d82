//! In-process strategy backed by the embedded box-packing library.
//!
//! The library only knows single boxes, so every unit of every item becomes
//! its own geometry, identified by its [`InstanceId`] string. Axis
//! correspondence with the library is fixed:
//!
//! | engine | library |
//! |--------|---------|
//! | length | width   |
//! | width  | height  |
//! | height | depth   |
//!
//! Positions map x→x, y→y, z→z under the same correspondence.

use crate::context::PackContext;
use crate::error::PackingError;
use crate::instance::InstanceId;
use crate::totals::Totals;
use crate::types::{ContainerInput, ItemInput, PackedItem, PackingResult, Position};
use crate::units::{g_to_kg, kg_to_g, mm3_to_m3};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use stowage_core::solver::{Config, Solver, Strategy};
use stowage_core::{Geometry, Placement, SolveResult};
use stowage_d3::{Boundary3D, Geometry3D, Packer3D};

/// Label used when a placed instance cannot be traced back to its item.
const UNKNOWN_LABEL: &str = "Unknown";

/// Packs with the embedded library using best-fit decreasing.
#[derive(Debug, Clone, Default)]
pub struct LocalPacker;

impl LocalPacker {
    /// Strategy name reported in results.
    pub const STRATEGY_NAME: &'static str = "local_best_fit_decreasing";

    /// Creates a new local packer.
    pub fn new() -> Self {
        Self
    }

    /// Packs `items` into `container`.
    pub fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError> {
        let start = Instant::now();

        let boundary = to_boundary(container);
        let geometries = expand_instances(items);
        let lookup = item_lookup(items);
        log::debug!(
            "packing {} instances of {} items into '{}'",
            geometries.len(),
            items.len(),
            container.id
        );

        if container.volume_mm3() <= 0.0 {
            log::warn!("container '{}' has no volume, nothing packed", container.id);
            let unplaced: Vec<String> = geometries.iter().map(|g| g.id().clone()).collect();
            return Ok(PackingResult::assemble(
                container,
                Vec::new(),
                group_unfit(&unplaced, &lookup),
                0.0,
                0.0,
                Self::STRATEGY_NAME,
                start.elapsed().as_millis() as u64,
            ));
        }

        let mut config = Config::new().with_strategy(Strategy::BestFitDecreasing);
        if let Some(timeout) = ctx.timeout() {
            config = config.with_time_limit(time_limit_ms(timeout));
        }
        let solver = Packer3D::new(config).with_cancellation(ctx.cancel_flag());
        let solved = solver.solve(&geometries, std::slice::from_ref(&boundary))?;

        let placements = first_box(&solved);
        let totals: Totals = placements
            .iter()
            .map(|p| (p.volume(), p.weight))
            .collect();
        let packed_items = placements
            .iter()
            .map(|p| to_packed_item(p, &lookup))
            .collect();
        let unfit_items = group_unfit(&solved.unplaced, &lookup);

        let elapsed = start.elapsed().as_millis() as u64;
        Ok(PackingResult::assemble(
            container,
            packed_items,
            unfit_items,
            mm3_to_m3(totals.volume_mm3),
            g_to_kg(totals.weight),
            Self::STRATEGY_NAME,
            elapsed,
        ))
    }
}

/// Library time limit for a call timeout. Zero means unlimited to the library,
/// so sub-millisecond timeouts round up to 1ms; huge ones saturate.
fn time_limit_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis())
        .unwrap_or(u64::MAX)
        .max(1)
}

/// Container as a library boundary. Max weight goes kg→g; zero means no limit.
fn to_boundary(container: &ContainerInput) -> Boundary3D {
    let boundary = Boundary3D::new(
        container.id.clone(),
        container.length,
        container.width,
        container.height,
    );
    if container.max_weight > 0.0 {
        boundary.with_max_weight(kg_to_g(container.max_weight))
    } else {
        boundary
    }
}

/// One library geometry per unit, ids `<item>:<k>` for k in `0..quantity`.
fn expand_instances(items: &[ItemInput]) -> Vec<Geometry3D> {
    items
        .iter()
        .flat_map(|item| {
            (0..item.quantity).map(move |k| {
                Geometry3D::new(
                    InstanceId::new(item.id.clone(), k).to_string(),
                    item.length,
                    item.width,
                    item.height,
                )
                .with_weight(kg_to_g(item.weight))
            })
        })
        .collect()
}

/// First occurrence wins for duplicate ids.
fn item_lookup(items: &[ItemInput]) -> HashMap<&str, &ItemInput> {
    let mut lookup = HashMap::with_capacity(items.len());
    for item in items {
        lookup.entry(item.id.as_str()).or_insert(item);
    }
    lookup
}

/// Placements in the first box that received anything.
fn first_box(solved: &SolveResult) -> Vec<&Placement> {
    match solved.used_boundaries().first() {
        Some(&index) => solved.placements_in(index).collect(),
        None => Vec::new(),
    }
}

fn to_packed_item(placement: &Placement, lookup: &HashMap<&str, &ItemInput>) -> PackedItem {
    let instance_id = parse_instance(&placement.geometry_id);
    let item = lookup.get(instance_id.item_id.as_str());
    if item.is_none() {
        log::warn!(
            "placed instance '{}' does not match any requested item",
            placement.geometry_id
        );
    }

    PackedItem {
        item_id: instance_id.item_id.clone(),
        label: item.map_or_else(|| UNKNOWN_LABEL.to_string(), |i| i.label.clone()),
        product_ref: item.and_then(|i| i.product_ref.clone()),
        instance_id,
        rotated_length: placement.width(),
        rotated_width: placement.height(),
        rotated_height: placement.depth(),
        position: Position::new(
            placement.position.x,
            placement.position.y,
            placement.position.z,
        ),
        rotation: placement.rotation_index as i64,
    }
}

/// Ids produced by [`expand_instances`] always parse; anything else keeps the
/// raw id as the item id.
fn parse_instance(geometry_id: &str) -> InstanceId {
    geometry_id
        .parse()
        .unwrap_or_else(|_| InstanceId::new(geometry_id, 0))
}

/// Groups unplaced instances by item, in first-seen order, as item copies whose
/// quantity is the number of units that failed.
fn group_unfit(unplaced: &[String], lookup: &HashMap<&str, &ItemInput>) -> Vec<ItemInput> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();
    for geometry_id in unplaced {
        let item_id = parse_instance(geometry_id).item_id;
        let count = counts.entry(item_id.clone()).or_insert(0);
        if *count == 0 {
            order.push(item_id);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|item_id| {
            let Some(item) = lookup.get(item_id.as_str()) else {
                log::warn!("unfit instance of unknown item '{item_id}' dropped");
                return None;
            };
            let mut unfit = (*item).clone();
            unfit.quantity = counts[&item_id];
            Some(unfit)
        })
        .collect()
}
