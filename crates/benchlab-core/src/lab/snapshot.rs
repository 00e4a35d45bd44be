//! Read-only view of the lab for render consumers

use benchlab_chemistry::{Rgb, ToolKind};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{ContentRecord, Liquid, ObjectId, Particle, ParticleKind, Slot, WorldObject};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub kind: ToolKind,
    pub position: Vec2,
    pub angle: f32,
    pub scale: f32,
    pub opacity: f32,
    pub grabbed: bool,
    pub liquid: Option<Liquid>,
    /// Flame state and animation frame, burners only
    pub flame: Option<(bool, usize)>,
}

impl From<&WorldObject> for ObjectSnapshot {
    fn from(obj: &WorldObject) -> Self {
        Self {
            id: obj.id,
            kind: obj.kind,
            position: obj.position,
            angle: obj.angle,
            scale: obj.scale,
            opacity: obj.opacity,
            grabbed: obj.is_grabbed(),
            liquid: obj.liquid().copied(),
            flame: obj.burner().map(|b| (b.flame_on, b.frame_index)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub index: usize,
    pub position: Vec2,
    pub occupied_by: Option<ObjectId>,
    pub contents: Vec<ContentRecord>,
    pub glow: f32,
    pub reaction: Option<String>,
}

impl From<&Slot> for SlotSnapshot {
    fn from(slot: &Slot) -> Self {
        Self {
            index: slot.index,
            position: slot.position,
            occupied_by: slot.occupied_by,
            contents: slot.contents.clone(),
            glow: slot.glow,
            reaction: slot.reaction_name().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub life: f32,
    pub alpha: u8,
}

impl From<&Particle> for ParticleSnapshot {
    fn from(p: &Particle) -> Self {
        Self {
            kind: p.kind,
            position: p.position,
            size: p.size,
            color: p.color,
            life: p.life,
            alpha: p.alpha(),
        }
    }
}

/// Everything a renderer reads, taken after a tick settles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSnapshot {
    /// Simulated lab time (s)
    pub time: f64,
    pub frame_size: Vec2,
    pub objects: Vec<ObjectSnapshot>,
    pub slots: Vec<SlotSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
}
