//! Service-backed strategy.
//!
//! The service understands quantities, so items are sent once per type. It
//! answers with one entry per placed unit, each carrying a step number and a
//! rotation code, plus one entry per item type with leftover units.

pub mod gateway;
pub mod wire;

pub use gateway::{decode_response, HttpGateway, PackingGateway};
pub use wire::{PackData, PackRequest, PackResponse, WirePlacement, WireUnfitted};

use crate::context::PackContext;
use crate::error::PackingError;
use crate::instance::InstanceId;
use crate::totals::Totals;
use crate::types::{ContainerInput, ItemInput, PackedItem, PackingResult, Position};
use crate::units::{mm3_to_m3, rotated_dimensions};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Packs by delegating to the remote packing service.
#[derive(Clone)]
pub struct RemotePacker {
    gateway: Arc<dyn PackingGateway>,
}

impl fmt::Debug for RemotePacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemotePacker").finish_non_exhaustive()
    }
}

impl RemotePacker {
    /// Strategy name reported in results.
    pub const STRATEGY_NAME: &'static str = "remote_service";

    /// Creates a remote packer over `gateway`.
    pub fn new(gateway: Arc<dyn PackingGateway>) -> Self {
        Self { gateway }
    }

    /// Packs `items` into `container` with one gateway call.
    pub fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError> {
        if ctx.is_cancelled() {
            return Err(PackingError::Cancelled);
        }

        let request = PackRequest::new(container, items);
        let start = Instant::now();
        let data = self.gateway.submit(&request, ctx.timeout())?;
        let wall_ms = start.elapsed().as_millis() as u64;

        if ctx.is_cancelled() {
            return Err(PackingError::Cancelled);
        }

        let lookup = item_lookup(items);
        let packed_items = map_placements(data.placements, &lookup)?;
        let totals: Totals = packed_items
            .iter()
            .map(|p| {
                // map_placements already resolved every item id.
                let weight = lookup.get(p.item_id.as_str()).map_or(0.0, |i| i.weight);
                (p.volume_mm3(), weight)
            })
            .collect();
        let unfit_items = map_unfitted(&data.unfitted, &lookup);

        let elapsed = data
            .stats
            .as_ref()
            .and_then(|s| s.total_time_ms)
            .filter(|ms| *ms > 0.0)
            .map_or(wall_ms, |ms| ms.round() as u64);

        log::debug!(
            "service packed {} units into '{}', {} item types unfit",
            totals.count,
            container.id,
            unfit_items.len()
        );

        Ok(PackingResult::assemble(
            container,
            packed_items,
            unfit_items,
            mm3_to_m3(totals.volume_mm3),
            totals.weight,
            Self::STRATEGY_NAME,
            elapsed,
        ))
    }
}

/// First occurrence wins for duplicate ids.
fn item_lookup(items: &[ItemInput]) -> HashMap<&str, &ItemInput> {
    let mut lookup = HashMap::with_capacity(items.len());
    for item in items {
        lookup.entry(item.id.as_str()).or_insert(item);
    }
    lookup
}

/// Orders placements by step number and maps them to packed items.
///
/// Instance sequences count from 1 per item, in step order. A placement for an
/// item that was never sent fails the whole call.
fn map_placements(
    mut placements: Vec<WirePlacement>,
    lookup: &HashMap<&str, &ItemInput>,
) -> Result<Vec<PackedItem>, PackingError> {
    placements.sort_by_key(|p| p.step_number);

    let mut sequences: HashMap<String, u32> = HashMap::new();
    placements
        .into_iter()
        .map(|placement| {
            let item = lookup.get(placement.item_id.as_str()).ok_or_else(|| {
                PackingError::ContractViolation(format!(
                    "placement at step {} references unknown item '{}'",
                    placement.step_number, placement.item_id
                ))
            })?;

            let sequence = sequences.entry(placement.item_id.clone()).or_insert(0);
            *sequence += 1;

            let (length, width, height) =
                rotated_dimensions(placement.rotation, item.length, item.width, item.height);

            Ok(PackedItem {
                instance_id: InstanceId::new(placement.item_id.clone(), *sequence),
                item_id: placement.item_id,
                label: item.label.clone(),
                product_ref: item.product_ref.clone(),
                rotated_length: length,
                rotated_width: width,
                rotated_height: height,
                position: Position::new(placement.pos_x, placement.pos_y, placement.pos_z),
                rotation: placement.rotation,
            })
        })
        .collect()
}

/// Maps unfit groups back to item copies. Unknown ids are skipped.
fn map_unfitted(unfitted: &[WireUnfitted], lookup: &HashMap<&str, &ItemInput>) -> Vec<ItemInput> {
    unfitted
        .iter()
        .filter_map(|entry| {
            let Some(item) = lookup.get(entry.item_id.as_str()) else {
                log::warn!(
                    "service reported {} unfit units of unknown item '{}', skipped",
                    entry.count,
                    entry.item_id
                );
                return None;
            };
            let mut unfit = (*item).clone();
            unfit.quantity = entry.count;
            Some(unfit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(item_id: &str, step: i64, rotation: i64) -> WirePlacement {
        WirePlacement {
            item_id: item_id.to_string(),
            label: String::new(),
            pos_x: 0.0,
            pos_y: 0.0,
            pos_z: step as f64,
            rotation,
            step_number: step,
        }
    }

    #[test]
    fn test_placements_sorted_stably_by_step() {
        let items = vec![
            ItemInput::new("A", "a", 10.0, 20.0, 30.0, 1.0).with_quantity(2),
            ItemInput::new("B", "b", 11.0, 22.0, 33.0, 1.0),
        ];
        let lookup = item_lookup(&items);
        let wire = vec![
            placement("B", 2, 1),
            placement("A", 1, 0),
            placement("A", 2, 0),
        ];

        let packed = map_placements(wire, &lookup).unwrap();

        let order: Vec<String> = packed.iter().map(|p| p.instance_id.to_string()).collect();
        assert_eq!(order, vec!["A:1", "B:1", "A:2"]);
        assert_eq!(
            (packed[1].rotated_length, packed[1].rotated_width, packed[1].rotated_height),
            (22.0, 11.0, 33.0)
        );
    }

    #[test]
    fn test_unknown_placement_is_contract_violation() {
        let items = vec![ItemInput::new("A", "a", 1.0, 1.0, 1.0, 1.0)];
        let lookup = item_lookup(&items);

        let err = map_placements(vec![placement("Z", 1, 0)], &lookup).unwrap_err();
        match err {
            PackingError::ContractViolation(message) => assert!(message.contains("'Z'")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_unfit_is_skipped() {
        let items = vec![ItemInput::new("A", "a", 1.0, 1.0, 1.0, 1.0).with_quantity(5)];
        let lookup = item_lookup(&items);
        let unfitted = vec![
            WireUnfitted {
                item_id: "X".into(),
                label: String::new(),
                count: 1,
            },
            WireUnfitted {
                item_id: "A".into(),
                label: String::new(),
                count: 3,
            },
        ];

        let unfit = map_unfitted(&unfitted, &lookup);
        assert_eq!(unfit.len(), 1);
        assert_eq!(unfit[0].id, "A");
        assert_eq!(unfit[0].quantity, 3);
    }
}
