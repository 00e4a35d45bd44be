//! Toolbar sections and spawn gating
//!
//! The ribbon itself (icons, hit-testing) is drawn by the front end. This
//! module owns what the ribbon offers and how often it may spawn.

use benchlab_core::chemistry::ToolKind;
use benchlab_core::{Lab, ObjectId};
use glam::Vec2;

/// Named group of tools on the ribbon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarSection {
    pub name: &'static str,
    pub tools: &'static [ToolKind],
}

pub static SECTIONS: [ToolbarSection; 4] = [
    ToolbarSection {
        name: "Tools",
        tools: &[
            ToolKind::Flask,
            ToolKind::Beaker,
            ToolKind::TestTube,
            ToolKind::Dropper,
        ],
    },
    ToolbarSection {
        name: "Containers",
        tools: &[ToolKind::Cylinder, ToolKind::Petri],
    },
    ToolbarSection {
        name: "Heating",
        tools: &[ToolKind::Burner],
    },
    ToolbarSection {
        name: "Mixing",
        tools: &[ToolKind::Rod, ToolKind::Spatula],
    },
];

/// Spawn point as a fraction of the frame
const SPAWN_ANCHOR: Vec2 = Vec2::new(0.5, 0.4);

/// Minimum interval between two spawns
#[derive(Debug, Clone)]
pub struct SpawnCooldown {
    interval: f64,
    last_spawn: Option<f64>,
}

impl SpawnCooldown {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last_spawn: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_spawn {
            Some(last) => now - last >= self.interval,
            None => true,
        }
    }

    /// Claim the cooldown at `now`; false while it is still running
    pub fn try_acquire(&mut self, now: f64) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_spawn = Some(now);
        true
    }
}

impl Default for SpawnCooldown {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    cooldown: SpawnCooldown,
}

impl Toolbar {
    pub fn new(cooldown: SpawnCooldown) -> Self {
        Self { cooldown }
    }

    pub fn sections(&self) -> &'static [ToolbarSection] {
        &SECTIONS
    }

    /// Every tool on the ribbon, in ribbon order
    pub fn tools(&self) -> impl Iterator<Item = ToolKind> {
        SECTIONS.iter().flat_map(|s| s.tools.iter().copied())
    }

    pub fn cooldown(&self) -> &SpawnCooldown {
        &self.cooldown
    }

    /// Spawn `kind` at the ribbon's drop point if the cooldown allows
    ///
    /// `now` is the lab clock. Returns `None` while cooling down.
    pub fn request_spawn(&mut self, lab: &mut Lab, kind: ToolKind, now: f64) -> Option<ObjectId> {
        if !self.cooldown.try_acquire(now) {
            log::debug!("Spawn of {} rejected, toolbar cooling down", kind);
            return None;
        }

        let position = lab.frame_size() * SPAWN_ANCHOR;
        let id = lab.spawn(kind, position);
        log::info!("[SPAWN] {}", lab.tools().get(kind).name);
        Some(id)
    }
}
