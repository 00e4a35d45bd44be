//! Per-frame hand input as seen by the simulation

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which hand a tracked sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandLabel {
    Left,
    Right,
}

impl HandLabel {
    pub const BOTH: [HandLabel; 2] = [HandLabel::Left, HandLabel::Right];
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandLabel::Left => f.write_str("Left"),
            HandLabel::Right => f.write_str("Right"),
        }
    }
}

/// One tracked hand in frame pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandState {
    pub wrist: Vec2,
    pub index_tip: Vec2,
    /// Thumb and index fingertip are touching
    pub pinch: bool,
    /// Orientation of the hand (wrist to index knuckle), radians
    pub angle: f32,
}

impl HandState {
    /// A hand with the index tip at the wrist, handy for scripted input
    pub fn at(wrist: Vec2, pinch: bool, angle: f32) -> Self {
        Self {
            wrist,
            index_tip: wrist,
            pinch,
            angle,
        }
    }
}

/// Hands detected this frame; a missing hand is `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandInput {
    pub left: Option<HandState>,
    pub right: Option<HandState>,
}

impl HandInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: HandLabel) -> Option<&HandState> {
        match label {
            HandLabel::Left => self.left.as_ref(),
            HandLabel::Right => self.right.as_ref(),
        }
    }

    pub fn set(&mut self, label: HandLabel, state: Option<HandState>) {
        match label {
            HandLabel::Left => self.left = state,
            HandLabel::Right => self.right = state,
        }
    }

    /// Detected hands, left first
    pub fn iter(&self) -> impl Iterator<Item = (HandLabel, &HandState)> {
        HandLabel::BOTH
            .into_iter()
            .filter_map(move |label| self.get(label).map(|state| (label, state)))
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
