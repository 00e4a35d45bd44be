//! Slot system - platform layout, occupancy and pouring

use glam::Vec2;

use crate::entity::{ContentRecord, ObjectId, Slot, WorldObject};
use crate::lab::LabStats;
use crate::tunables::SlotTunables;

/// Pixels kept free under the slot row when it is given in pixels
const ROW_BOTTOM_MARGIN: f32 = 150.0;

pub struct SlotSystem;

impl SlotSystem {
    /// Run layout, occupancy and pouring for one frame
    pub fn update(
        slots: &mut [Slot],
        objects: &mut [WorldObject],
        frame: Vec2,
        tunables: &SlotTunables,
        stats: &mut dyn LabStats,
    ) {
        Self::layout(slots, frame, tunables);
        Self::assign(slots, objects, tunables);
        Self::pour(slots, objects, tunables, stats);
    }

    /// Height of the slot row for a frame
    pub fn row_y(frame: Vec2, tunables: &SlotTunables) -> f32 {
        if tunables.row < 1.0 {
            frame.y * tunables.row
        } else {
            tunables.row.min(frame.y - ROW_BOTTOM_MARGIN)
        }
    }

    /// Recompute slot centers from the current frame size
    ///
    /// Slots form one row centered horizontally.
    pub fn layout(slots: &mut [Slot], frame: Vec2, tunables: &SlotTunables) {
        let y = Self::row_y(frame, tunables);
        let span = slots.len().saturating_sub(1) as f32 * tunables.spacing;
        let left = frame.x * 0.5 - span * 0.5;

        for (i, slot) in slots.iter_mut().enumerate() {
            slot.position = Vec2::new(left + i as f32 * tunables.spacing, y);
        }
    }

    /// Whether a point lies inside a slot's occupancy window
    pub fn in_window(slot: &Slot, point: Vec2, tunables: &SlotTunables) -> bool {
        let d = (point - slot.position).abs();
        d.x <= tunables.width * tunables.tolerance_x && d.y <= tunables.height * tunables.tolerance_y
    }

    /// Re-derive `occupied_by` from positions
    ///
    /// Each resting object claims the first slot whose window contains it.
    /// An object that finds its slot already taken by an earlier object does
    /// not look further.
    pub fn assign(slots: &mut [Slot], objects: &[WorldObject], tunables: &SlotTunables) {
        for slot in slots.iter_mut() {
            slot.occupied_by = None;
        }

        for obj in objects {
            if obj.is_grabbed() || !obj.occupies_slots {
                continue;
            }

            if let Some(slot) = slots
                .iter_mut()
                .find(|s| Self::in_window(s, obj.position, tunables))
                && slot.occupied_by.is_none()
            {
                slot.occupied_by = Some(obj.id);
            }
        }
    }

    /// Pour once per occupancy: a slot whose occupant changed since the last
    /// frame draws up to the pour cap from a vessel with liquid left
    pub fn pour(
        slots: &mut [Slot],
        objects: &mut [WorldObject],
        tunables: &SlotTunables,
        stats: &mut dyn LabStats,
    ) {
        for slot in slots.iter_mut() {
            if slot.occupied_by == slot.last_object_id {
                continue;
            }
            slot.last_object_id = slot.occupied_by;

            let Some(ObjectId(index)) = slot.occupied_by else {
                continue;
            };
            let Some(obj) = objects.get_mut(index) else {
                continue;
            };
            let kind = obj.kind;
            let Some(liquid) = obj.pourable_liquid_mut() else {
                continue;
            };
            if liquid.is_empty() {
                continue;
            }

            let color = liquid.color;
            let volume = liquid.draw(tunables.pour_cap);
            slot.pour(ContentRecord {
                source: kind,
                color,
                volume,
            });
            stats.record_pour(volume);
            log::debug!("Poured {:.1} of {} into slot {}", volume, kind, slot.index);
        }
    }
}
