//! Visual-only particles (smoke, droplets)

use benchlab_chemistry::Rgb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Rises and slows down (drag)
    Smoke,
    /// Falls in a straight line
    Droplet,
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in seconds
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(
        kind: ParticleKind,
        position: Vec2,
        velocity: Vec2,
        life: f32,
        size: f32,
        color: Rgb,
    ) -> Self {
        Self {
            kind,
            position,
            velocity,
            life,
            max_life: life,
            size,
            color,
        }
    }

    /// Alpha based on remaining life (fades out)
    pub fn alpha(&self) -> u8 {
        if self.max_life <= 0.0 {
            return 0;
        }
        ((self.life / self.max_life).clamp(0.0, 1.0) * 255.0) as u8
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
