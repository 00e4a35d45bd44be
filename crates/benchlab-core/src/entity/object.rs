//! World objects - one spawned tool instance on the bench

use benchlab_chemistry::{Rgb, ToolDef, ToolKind};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::input::HandLabel;

/// Index of an object in the lab's object list
///
/// Objects are never removed during a session, so an id stays valid for
/// the lifetime of the lab that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Liquid held by a container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Liquid {
    pub color: Rgb,
    /// Remaining volume, never negative
    pub volume: f32,
}

impl Liquid {
    /// Remove up to `max` volume and return the amount removed
    pub fn draw(&mut self, max: f32) -> f32 {
        let amount = self.volume.min(max.max(0.0));
        self.volume -= amount;
        amount
    }

    pub fn is_empty(&self) -> bool {
        self.volume <= 0.0
    }
}

/// Flame state of a burner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BurnerState {
    pub flame_on: bool,
    /// Current flame animation frame
    pub frame_index: usize,
    /// Time accumulated toward the next animation frame
    pub frame_timer: f32,
    /// Fractional smoke particles owed from previous ticks
    pub smoke_accumulator: f32,
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolState {
    /// A container that pours into slots
    Vessel(Liquid),
    /// A dropper that drips into slots while held above them
    Dropper { liquid: Liquid, drip_timer: f32 },
    Burner(BurnerState),
    Inert,
}

/// One tool instance on the bench
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub kind: ToolKind,

    pub position: Vec2,
    pub velocity: Vec2,
    /// Rotation in radians
    pub angle: f32,
    /// Radians per reference frame (60 Hz)
    pub angular_velocity: f32,

    /// Hand currently holding this object
    pub grabbed_by: Option<HandLabel>,
    /// Object position relative to the holding wrist at grab time
    pub grab_offset: Vec2,
    /// Object angle relative to the holding hand at grab time
    pub grab_angle_offset: f32,

    pub scale: f32,
    pub opacity: f32,
    /// Follows the holding hand's orientation
    pub rotatable: bool,
    /// Can claim a reaction slot
    pub occupies_slots: bool,

    pub state: ToolState,
}

impl WorldObject {
    /// Build a fresh object from its tool definition
    pub fn from_def(id: ObjectId, def: &ToolDef, position: Vec2, flame_on: bool) -> Self {
        let state = match (def.kind, def.liquid) {
            (ToolKind::Burner, _) => ToolState::Burner(BurnerState {
                flame_on,
                ..BurnerState::default()
            }),
            (ToolKind::Dropper, Some(l)) => ToolState::Dropper {
                liquid: Liquid {
                    color: l.color,
                    volume: l.volume,
                },
                drip_timer: 0.0,
            },
            (_, Some(l)) => ToolState::Vessel(Liquid {
                color: l.color,
                volume: l.volume,
            }),
            (_, None) => ToolState::Inert,
        };

        Self {
            id,
            kind: def.kind,
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            grabbed_by: None,
            grab_offset: Vec2::ZERO,
            grab_angle_offset: 0.0,
            scale: def.scale,
            opacity: 1.0,
            rotatable: def.rotatable,
            occupies_slots: def.occupies_slots,
            state,
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed_by.is_some()
    }

    /// Bind this object to a hand, keeping its current pose relative to it
    pub fn bind_to_hand(&mut self, hand: HandLabel, wrist: Vec2, hand_angle: f32) {
        self.grabbed_by = Some(hand);
        self.grab_offset = self.position - wrist;
        self.grab_angle_offset = self.angle - hand_angle;
    }

    /// Clear the grab binding; velocity and angle carry over
    pub fn release(&mut self) {
        self.grabbed_by = None;
        self.grab_offset = Vec2::ZERO;
        self.grab_angle_offset = 0.0;
    }

    /// Half of the rendered edge length, used for floor contact
    pub fn half_size(&self, base_size: f32) -> f32 {
        base_size * self.scale * 0.5
    }

    pub fn liquid(&self) -> Option<&Liquid> {
        match &self.state {
            ToolState::Vessel(liquid) | ToolState::Dropper { liquid, .. } => Some(liquid),
            _ => None,
        }
    }

    pub fn liquid_mut(&mut self) -> Option<&mut Liquid> {
        match &mut self.state {
            ToolState::Vessel(liquid) | ToolState::Dropper { liquid, .. } => Some(liquid),
            _ => None,
        }
    }

    /// Liquid that pours into a slot when this object lands in it
    ///
    /// Droppers only drip, they never pour.
    pub fn pourable_liquid_mut(&mut self) -> Option<&mut Liquid> {
        match &mut self.state {
            ToolState::Vessel(liquid) => Some(liquid),
            _ => None,
        }
    }

    pub fn burner(&self) -> Option<&BurnerState> {
        match &self.state {
            ToolState::Burner(burner) => Some(burner),
            _ => None,
        }
    }

    pub fn burner_mut(&mut self) -> Option<&mut BurnerState> {
        match &mut self.state {
            ToolState::Burner(burner) => Some(burner),
            _ => None,
        }
    }

    pub fn is_lit_burner(&self) -> bool {
        self.burner().is_some_and(|b| b.flame_on)
    }
}
