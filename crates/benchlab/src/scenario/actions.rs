//! Scripted actions for lab scenarios
//!
//! Objects are referred to by spawn order: the first tool spawned in a
//! scenario is object 0.

use benchlab_core::HandLabel;
use benchlab_core::chemistry::ToolKind;
use serde::{Deserialize, Serialize};

use super::verification::VerificationCondition;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioAction {
    // === LAB SETUP ===
    /// Put a tool on the bench at an exact position
    SpawnTool { tool: ToolKind, x: f32, y: f32 },

    /// Spawn through the toolbar, subject to its cooldown
    ToolbarSpawn { tool: ToolKind },

    /// Replace a container's liquid
    SetLiquid {
        object: usize,
        color: (u8, u8, u8),
        volume: f32,
    },

    /// Light or extinguish a burner
    SetFlame { object: usize, on: bool },

    /// Teleport an object and stop it
    PlaceObject { object: usize, x: f32, y: f32 },

    // === HAND INPUT ===
    /// Hold a hand pose for N frames
    Hand {
        hand: HandLabel,
        x: f32,
        y: f32,
        pinch: bool,
        #[serde(default)]
        angle: f32,
        frames: usize,
    },

    /// Move a hand from its last pose to a target over N frames
    MoveHand {
        hand: HandLabel,
        x: f32,
        y: f32,
        pinch: bool,
        #[serde(default)]
        angle: f32,
        frames: usize,
    },

    /// Take a hand out of view
    HideHand { hand: HandLabel },

    /// Feed raw landmarks (normalized to the frame) through the hand filter
    /// for N frames, as a camera front end would
    Landmarks {
        hand: HandLabel,
        wrist: (f32, f32),
        index_tip: (f32, f32),
        thumb_tip: (f32, f32),
        index_mcp: (f32, f32),
        frames: usize,
    },

    // === CONTROL FLOW ===
    WaitFrames { frames: usize },

    /// Wait for an amount of simulated time
    WaitSeconds { seconds: f32 },

    /// Tick until a condition holds, failing after `timeout_frames`
    WaitUntil {
        condition: VerificationCondition,
        timeout_frames: usize,
    },

    Log { message: String },

    Sequence { actions: Vec<ScenarioAction> },
}
