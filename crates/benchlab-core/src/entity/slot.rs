//! Reaction slots on the lab platform

use benchlab_chemistry::{Recipe, Rgb, ToolKind};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::object::ObjectId;

/// One pour (or merged run of drips) into a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Tool the liquid came from
    pub source: ToolKind,
    pub color: Rgb,
    pub volume: f32,
}

/// A reaction in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveReaction {
    /// Lab time the reaction started (s)
    pub start: f64,
    /// Seconds until expiry
    pub duration: f32,
    pub name: String,
    pub result_color: Rgb,
    pub gas_rate: f32,
}

impl ActiveReaction {
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration as f64
    }
}

/// A reaction site on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    /// Center, recomputed from the frame size every tick
    pub position: Vec2,
    /// Object resting in the slot this tick
    pub occupied_by: Option<ObjectId>,
    /// Liquids in pour order
    pub contents: Vec<ContentRecord>,
    pub reaction: Option<ActiveReaction>,
    /// Recipe of the current reaction
    pub reaction_result: Option<Recipe>,
    /// Lab time a lit burner started heating this slot
    pub heated_since: Option<f64>,
    /// Occupant at the previous tick, to pour once per occupancy
    pub last_object_id: Option<ObjectId>,
    /// Cosmetic activity level in [0, 1]
    pub glow: f32,
    /// Fractional smoke particles owed from previous ticks
    pub gas_accumulator: f32,
}

impl Slot {
    pub fn new(index: usize, glow: f32) -> Self {
        Self {
            index,
            position: Vec2::ZERO,
            occupied_by: None,
            contents: Vec::new(),
            reaction: None,
            reaction_result: None,
            heated_since: None,
            last_object_id: None,
            glow: glow.clamp(0.0, 1.0),
            gas_accumulator: 0.0,
        }
    }

    pub fn is_reacting(&self) -> bool {
        self.reaction.is_some()
    }

    pub fn reaction_name(&self) -> Option<&str> {
        self.reaction.as_ref().map(|r| r.name.as_str())
    }

    /// Append a content record in pour order
    pub fn pour(&mut self, record: ContentRecord) {
        self.contents.push(record);
    }

    /// Add a drip, merging it into the last record when it came from the same source
    pub fn drip(&mut self, source: ToolKind, color: Rgb, volume: f32) {
        match self.contents.last_mut() {
            Some(last) if last.source == source => {
                last.volume += volume;
                last.color = color;
            }
            _ => self.pour(ContentRecord {
                source,
                color,
                volume,
            }),
        }
    }

    /// (source, volume) of every content record
    pub fn contributions(&self) -> impl Iterator<Item = (ToolKind, f32)> + '_ {
        self.contents.iter().map(|c| (c.source, c.volume))
    }

    /// Distinct sources that contributed a positive volume
    pub fn sources(&self) -> BTreeSet<ToolKind> {
        self.contributions()
            .filter(|(_, volume)| *volume > 0.0)
            .map(|(source, _)| source)
            .collect()
    }

    pub fn total_volume(&self) -> f32 {
        self.contents.iter().map(|c| c.volume).sum()
    }

    pub fn set_glow(&mut self, glow: f32) {
        self.glow = glow.clamp(0.0, 1.0);
    }
}
