//! Burner system - flame animation and burner smoke

use glam::Vec2;

use super::particles::{ParticleSystem, drain_accumulator};
use crate::entity::WorldObject;
use crate::lab::{LabRng, LabStats};
use crate::tunables::{BurnerTunables, ParticleTunables};

pub struct BurnerSystem;

impl BurnerSystem {
    /// Advance the flame animation of every lit burner
    pub fn animate(objects: &mut [WorldObject], dt: f32, tunables: &BurnerTunables) {
        let frames = tunables.flame_frame_count.max(1);

        for burner in objects.iter_mut().filter_map(|o| o.burner_mut()) {
            if !burner.flame_on {
                continue;
            }

            burner.frame_timer += dt;
            while burner.frame_timer >= tunables.flame_frame_interval {
                burner.frame_timer -= tunables.flame_frame_interval;
                burner.frame_index = (burner.frame_index + 1) % frames;
            }
        }
    }

    /// Emit smoke above every lit burner at the configured rate
    pub fn emit_smoke<R: LabRng>(
        objects: &mut [WorldObject],
        particles: &mut ParticleSystem,
        dt: f32,
        tunables: &ParticleTunables,
        rng: &mut R,
        stats: &mut dyn LabStats,
    ) {
        for obj in objects.iter_mut() {
            let position = obj.position - Vec2::new(0.0, tunables.burner_smoke_offset);
            let Some(burner) = obj.burner_mut() else {
                continue;
            };
            if !burner.flame_on {
                burner.smoke_accumulator = 0.0;
                continue;
            }

            let count = drain_accumulator(&mut burner.smoke_accumulator, tunables.burner_smoke_rate, dt);
            particles.spawn_smoke(position, count, rng, stats);
        }
    }
}
