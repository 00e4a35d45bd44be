//! Dropper system - held droppers drip into the slot below them

use glam::Vec2;

use super::particles::ParticleSystem;
use crate::entity::{Slot, ToolState, WorldObject};
use crate::lab::{LabRng, LabStats};
use crate::tunables::{DropperTunables, ParticleTunables, SlotTunables};

pub struct DropperSystem;

impl DropperSystem {
    /// Slot a dropper at `position` would drip into
    pub fn target_slot(
        slots: &[Slot],
        position: Vec2,
        tunables: &DropperTunables,
        slot_tunables: &SlotTunables,
    ) -> Option<usize> {
        let half_width = slot_tunables.width * slot_tunables.tolerance_x;
        slots.iter().position(|s| {
            let above = s.position.y - position.y;
            (s.position.x - position.x).abs() <= half_width
                && above > 0.0
                && above <= tunables.drip_reach
        })
    }

    /// Drip from every held dropper that has liquid and hangs over a slot
    ///
    /// A dropper that is put down or moved off a slot restarts its drip timer.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: LabRng>(
        objects: &mut [WorldObject],
        slots: &mut [Slot],
        particles: &mut ParticleSystem,
        dt: f32,
        tunables: &DropperTunables,
        slot_tunables: &SlotTunables,
        particle_tunables: &ParticleTunables,
        rng: &mut R,
        stats: &mut dyn LabStats,
    ) {
        for obj in objects.iter_mut() {
            let held = obj.is_grabbed();
            let kind = obj.kind;
            let position = obj.position;
            let ToolState::Dropper { liquid, drip_timer } = &mut obj.state else {
                continue;
            };

            let target = if held && !liquid.is_empty() {
                Self::target_slot(slots, position, tunables, slot_tunables)
            } else {
                None
            };
            let Some(slot_index) = target else {
                *drip_timer = 0.0;
                continue;
            };

            *drip_timer += dt;
            while *drip_timer >= tunables.drip_interval {
                *drip_timer -= tunables.drip_interval;

                let volume = liquid.draw(tunables.droplet_volume);
                if volume <= 0.0 {
                    break;
                }

                slots[slot_index].drip(kind, liquid.color, volume);
                particles.spawn_droplet(position, liquid.color, particle_tunables, rng, stats);
                log::trace!("Dropper dripped {:.1} into slot {}", volume, slot_index);
            }
        }
    }
}
