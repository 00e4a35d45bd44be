//! Physics system - gravity, floor contact, side walls

use glam::Vec2;

use super::slots::SlotSystem;
use super::timing::per_frame_decay;
use crate::entity::WorldObject;
use crate::tunables::{PhysicsTunables, SlotTunables};

/// Owns linear velocity for every object
///
/// Angular velocity belongs to [`super::MotionSystem`] and is never touched
/// here, so nothing is damped twice.
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Floor line for a frame
    ///
    /// The floor hangs off the slot row's bottom edge, so a tool resting on
    /// it sits inside a slot at every frame size. It never leaves the frame.
    pub fn floor_y(frame: Vec2, slots: &SlotTunables, tunables: &PhysicsTunables) -> f32 {
        let row_bottom = SlotSystem::row_y(frame, slots) + slots.height * 0.5;
        (row_bottom + tunables.floor_offset).min(frame.y)
    }

    /// Update every object for one frame
    ///
    /// # Arguments
    /// * `objects` - Objects on the bench
    /// * `frame` - Current frame size in pixels
    /// * `dt` - Delta time in seconds
    /// * `tunables` - Physics constants
    /// * `slots` - Slot geometry the floor is derived from
    pub fn update(
        objects: &mut [WorldObject],
        frame: Vec2,
        dt: f32,
        tunables: &PhysicsTunables,
        slots: &SlotTunables,
    ) {
        let floor = Self::floor_y(frame, slots, tunables);

        for obj in objects.iter_mut() {
            let half = obj.half_size(tunables.base_size);

            if obj.is_grabbed() {
                Self::update_held(obj, half, floor, dt, tunables);
            } else {
                Self::update_free(obj, half, floor, frame.x, dt, tunables);
            }
        }
    }

    /// Held objects follow the hand; kill their velocity so a release does
    /// not fling them, and keep them above the floor
    fn update_held(obj: &mut WorldObject, half: f32, floor: f32, dt: f32, t: &PhysicsTunables) {
        obj.velocity.x *= per_frame_decay(t.held_horizontal_damping, dt);
        obj.velocity.y = 0.0;

        if obj.position.y + half > floor {
            obj.position.y = floor - half;
        }
    }

    fn update_free(
        obj: &mut WorldObject,
        half: f32,
        floor: f32,
        width: f32,
        dt: f32,
        t: &PhysicsTunables,
    ) {
        // 1. Gravity
        obj.velocity.y += t.gravity * dt;

        // 2. Integrate
        obj.position += obj.velocity * dt;

        // 3. Floor contact: bounce when fast, settle otherwise
        if obj.position.y + half > floor {
            obj.position.y = floor - half;

            if obj.velocity.y > t.bounce_threshold {
                obj.velocity.y = -obj.velocity.y * t.ground_damping;
            } else {
                obj.velocity.y = 0.0;
            }

            obj.velocity.x *= per_frame_decay(t.ground_friction, dt);
        }

        // 4. Side walls
        let right = (width - half).max(half);
        if obj.position.x < half {
            obj.position.x = half;
            obj.velocity.x = 0.0;
        } else if obj.position.x > right {
            obj.position.x = right;
            obj.velocity.x = 0.0;
        }
    }
}
