//! Motion system - angular damping and rotation

use super::timing::{REFERENCE_HZ, per_frame_decay};
use crate::entity::WorldObject;
use crate::tunables::MotionTunables;

/// Owns angular velocity for every object
pub struct MotionSystem;

impl MotionSystem {
    pub fn update(objects: &mut [WorldObject], dt: f32, tunables: &MotionTunables) {
        let free_decay = per_frame_decay(tunables.angular_damping, dt);
        let held_decay = per_frame_decay(tunables.held_angular_damping, dt);

        for obj in objects.iter_mut() {
            if obj.is_grabbed() {
                obj.angular_velocity *= held_decay;
            }
            obj.angular_velocity *= free_decay;

            // angular_velocity is in radians per reference frame
            obj.angle += obj.angular_velocity * dt * REFERENCE_HZ;
        }
    }
}
