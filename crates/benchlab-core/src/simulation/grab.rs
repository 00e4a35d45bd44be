//! Grab system - binds pinching hands to objects and drives held objects

use std::f32::consts::{PI, TAU};

use super::timing::per_frame_ease;
use crate::entity::{HandInput, HandLabel, WorldObject};
use crate::lab::LabStats;
use crate::tunables::GrabTunables;

/// Wrap an angle difference into (-PI, PI] so a hand crossing the atan2
/// seam does not spin the held object the long way round
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Per hand: Free until a pinch lands near an object, Held until the pinch
/// ends
pub struct GrabSystem;

impl GrabSystem {
    /// Update grab bindings and held poses for one frame
    ///
    /// Hands are processed left first. A hand that is not detected this frame
    /// keeps its binding; only an explicit open hand releases.
    pub fn update(
        objects: &mut [WorldObject],
        hands: &HandInput,
        dt: f32,
        tunables: &GrabTunables,
        stats: &mut dyn LabStats,
    ) {
        let position_ease = per_frame_ease(tunables.position_smoothing, dt);
        let rotation_ease = per_frame_ease(tunables.rotation_smoothing, dt);

        for (label, hand) in hands.iter() {
            let mut held = Self::held_by(objects, label);

            if !hand.pinch {
                if let Some(index) = held {
                    objects[index].release();
                    stats.record_release();
                    log::debug!("{} hand released {}", label, objects[index].kind);
                }
                continue;
            }

            if held.is_none() {
                held = Self::try_grab(objects, label, hand.wrist, hand.angle, tunables.radius);
                if let Some(index) = held {
                    stats.record_grab();
                    log::debug!("{} hand grabbed {}", label, objects[index].kind);
                }
            }

            let Some(index) = held else {
                continue;
            };
            let obj = &mut objects[index];

            let target = hand.wrist + obj.grab_offset;
            obj.position += (target - obj.position) * position_ease;

            if obj.rotatable {
                let target_angle = hand.angle + obj.grab_angle_offset;
                obj.angle += wrap_angle(target_angle - obj.angle) * rotation_ease;
            }
        }
    }

    /// Index of the object held by a hand
    pub fn held_by(objects: &[WorldObject], label: HandLabel) -> Option<usize> {
        objects.iter().position(|o| o.grabbed_by == Some(label))
    }

    /// Bind the first unheld object (list order) within the grab radius
    fn try_grab(
        objects: &mut [WorldObject],
        label: HandLabel,
        wrist: glam::Vec2,
        hand_angle: f32,
        radius: f32,
    ) -> Option<usize> {
        let radius_sq = radius * radius;
        let index = objects
            .iter()
            .position(|o| !o.is_grabbed() && o.position.distance_squared(wrist) < radius_sq)?;

        objects[index].bind_to_hand(label, wrist, hand_angle);
        Some(index)
    }
}
