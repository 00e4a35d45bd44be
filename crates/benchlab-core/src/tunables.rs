//! Named simulation constants
//!
//! Every "per frame" factor is a factor per reference frame at 60 Hz and is
//! applied as `factor.powf(dt * 60)`, so the feel stays the same when the
//! camera delivers frames at a different cadence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TunablesError {
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    #[error("slot count must be at least 1")]
    NoSlots,
    #[error("flame animation needs at least one frame")]
    NoFlameFrames,
}

/// All simulation tunables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tunables {
    #[serde(default)]
    pub physics: PhysicsTunables,

    #[serde(default)]
    pub motion: MotionTunables,

    #[serde(default)]
    pub grab: GrabTunables,

    #[serde(default)]
    pub slots: SlotTunables,

    #[serde(default)]
    pub reaction: ReactionTunables,

    #[serde(default)]
    pub particles: ParticleTunables,

    #[serde(default)]
    pub burner: BurnerTunables,

    #[serde(default)]
    pub dropper: DropperTunables,

    #[serde(default)]
    pub clock: ClockTunables,
}

/// Gravity, floor collision and linear damping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTunables {
    /// Downward acceleration in px/s^2
    pub gravity: f32,
    /// Fraction of vertical speed kept on a bounce
    pub ground_damping: f32,
    /// Incoming speed (px/s) above which an object bounces instead of settling
    pub bounce_threshold: f32,
    /// Floor line in px below the bottom edge of the slot row
    pub floor_offset: f32,
    /// Horizontal velocity kept per reference frame while touching the floor
    pub ground_friction: f32,
    /// Horizontal velocity kept per reference frame while held
    pub held_horizontal_damping: f32,
    /// Rendered edge length of a tool at scale 1.0 (px)
    pub base_size: f32,
}

impl Default for PhysicsTunables {
    fn default() -> Self {
        Self {
            gravity: 900.0,
            ground_damping: 0.3,
            bounce_threshold: 50.0,
            floor_offset: 0.0,
            ground_friction: 0.9,
            held_horizontal_damping: 0.85,
            base_size: 100.0,
        }
    }
}

/// Angular damping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTunables {
    /// Angular velocity kept per reference frame
    pub angular_damping: f32,
    /// Extra angular velocity kept per reference frame while held
    pub held_angular_damping: f32,
}

impl Default for MotionTunables {
    fn default() -> Self {
        Self {
            angular_damping: 0.96,
            held_angular_damping: 0.94,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabTunables {
    /// Wrist-to-object distance (px) within which a pinch binds
    pub radius: f32,
    /// Fraction of the distance to the target covered per reference frame
    pub position_smoothing: f32,
    /// Fraction of the angle to the target covered per reference frame
    pub rotation_smoothing: f32,
}

impl Default for GrabTunables {
    fn default() -> Self {
        Self {
            radius: 140.0,
            position_smoothing: 0.25,
            rotation_smoothing: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotTunables {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Horizontal distance between slot centers
    pub spacing: f32,
    /// Slot row: a fraction of frame height when < 1.0, else pixels from the top
    pub row: f32,
    /// Half-width of the occupancy window as a fraction of slot width
    pub tolerance_x: f32,
    /// Half-height of the occupancy window as a fraction of slot height
    pub tolerance_y: f32,
    /// Most liquid poured from one container per occupancy
    pub pour_cap: f32,
}

impl Default for SlotTunables {
    fn default() -> Self {
        Self {
            count: 3,
            width: 180.0,
            height: 100.0,
            spacing: 220.0,
            row: 0.80,
            tolerance_x: 0.45,
            tolerance_y: 0.6,
            pour_cap: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionTunables {
    /// Seconds a reaction stays active
    pub duration: f32,
    /// Heat-time gained per second under a flame
    pub heat_multiplier: f32,
    /// Heat-time (scaled seconds) needed to trigger
    pub heat_threshold: f32,
    /// Max horizontal burner offset as a fraction of slot width
    pub heat_alignment: f32,
    /// Max gap (px) between a slot's bottom edge and the top of a burner below it
    pub heat_reach: f32,
    /// Fraction of the remaining color distance blended per tick
    pub mix_strength: f32,
    /// Smoke particles per second per unit of recipe gas rate
    pub smoke_per_gas_rate: f32,
    pub glow_initial: f32,
    pub glow_floor: f32,
    /// Glow kept per reference frame before rises are applied
    pub glow_decay: f32,
    pub glow_occupied_rise: f32,
    pub glow_heated_rise: f32,
    pub glow_trigger_boost: f32,
    /// Glow after a reaction expires
    pub glow_baseline: f32,
}

impl Default for ReactionTunables {
    fn default() -> Self {
        Self {
            duration: 3.5,
            heat_multiplier: 1.8,
            heat_threshold: 1.8,
            heat_alignment: 0.45,
            heat_reach: 160.0,
            mix_strength: 0.18,
            smoke_per_gas_rate: 6.0,
            glow_initial: 0.9,
            glow_floor: 0.1,
            glow_decay: 0.95,
            glow_occupied_rise: 0.02,
            glow_heated_rise: 0.05,
            glow_trigger_boost: 0.35,
            glow_baseline: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTunables {
    pub max_particles: usize,
    /// Horizontal smoke velocity kept per reference frame
    pub smoke_drag_x: f32,
    /// Vertical smoke velocity kept per reference frame
    pub smoke_drag_y: f32,
    pub droplet_life: f32,
    pub droplet_size: f32,
    /// Smoke particles per second above a lit burner
    pub burner_smoke_rate: f32,
    /// Height above the burner center where smoke appears
    pub burner_smoke_offset: f32,
}

impl Default for ParticleTunables {
    fn default() -> Self {
        Self {
            max_particles: 500,
            smoke_drag_x: 0.98,
            smoke_drag_y: 0.97,
            droplet_life: 1.5,
            droplet_size: 6.0,
            burner_smoke_rate: 120.0,
            burner_smoke_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnerTunables {
    /// Seconds per flame animation frame
    pub flame_frame_interval: f32,
    pub flame_frame_count: usize,
    /// Light every burner as soon as it exists
    pub auto_ignite: bool,
}

impl Default for BurnerTunables {
    fn default() -> Self {
        Self {
            flame_frame_interval: 0.05,
            flame_frame_count: 12,
            auto_ignite: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropperTunables {
    /// Seconds between drips
    pub drip_interval: f32,
    /// Volume carried by one droplet
    pub droplet_volume: f32,
    /// Max height (px) above a slot center from which drips land in it
    pub drip_reach: f32,
}

impl Default for DropperTunables {
    fn default() -> Self {
        Self {
            drip_interval: 0.25,
            droplet_volume: 5.0,
            drip_reach: 260.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockTunables {
    /// Largest accepted frame delta (s)
    pub max_dt: f32,
    /// Delta substituted for rejected frame deltas (s)
    pub fallback_dt: f32,
}

impl Default for ClockTunables {
    fn default() -> Self {
        Self {
            max_dt: 0.3,
            fallback_dt: 1.0 / 60.0,
        }
    }
}

fn check(
    field: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), TunablesError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(TunablesError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), TunablesError> {
    check(field, value, value > 0.0 && value <= 1.0, "(0, 1]")
}

fn positive(field: &'static str, value: f32) -> Result<(), TunablesError> {
    check(field, value, value > 0.0, "> 0")
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TunablesError> {
    check(field, value, value >= 0.0, ">= 0")
}

impl Tunables {
    /// Reject values that would make the simulation diverge or misbehave
    pub fn validate(&self) -> Result<(), TunablesError> {
        let p = &self.physics;
        non_negative("physics.gravity", p.gravity)?;
        check(
            "physics.ground_damping",
            p.ground_damping,
            (0.0..=1.0).contains(&p.ground_damping),
            "[0, 1]",
        )?;
        non_negative("physics.bounce_threshold", p.bounce_threshold)?;
        check("physics.floor_offset", p.floor_offset, true, "finite")?;
        unit("physics.ground_friction", p.ground_friction)?;
        unit("physics.held_horizontal_damping", p.held_horizontal_damping)?;
        positive("physics.base_size", p.base_size)?;

        unit("motion.angular_damping", self.motion.angular_damping)?;
        unit("motion.held_angular_damping", self.motion.held_angular_damping)?;

        positive("grab.radius", self.grab.radius)?;
        unit("grab.position_smoothing", self.grab.position_smoothing)?;
        unit("grab.rotation_smoothing", self.grab.rotation_smoothing)?;

        let s = &self.slots;
        if s.count == 0 {
            return Err(TunablesError::NoSlots);
        }
        positive("slots.width", s.width)?;
        positive("slots.height", s.height)?;
        non_negative("slots.spacing", s.spacing)?;
        positive("slots.row", s.row)?;
        positive("slots.tolerance_x", s.tolerance_x)?;
        positive("slots.tolerance_y", s.tolerance_y)?;
        non_negative("slots.pour_cap", s.pour_cap)?;

        let r = &self.reaction;
        positive("reaction.duration", r.duration)?;
        positive("reaction.heat_multiplier", r.heat_multiplier)?;
        non_negative("reaction.heat_threshold", r.heat_threshold)?;
        positive("reaction.heat_alignment", r.heat_alignment)?;
        positive("reaction.heat_reach", r.heat_reach)?;
        unit("reaction.mix_strength", r.mix_strength)?;
        non_negative("reaction.smoke_per_gas_rate", r.smoke_per_gas_rate)?;
        unit("reaction.glow_decay", r.glow_decay)?;
        for (field, value) in [
            ("reaction.glow_initial", r.glow_initial),
            ("reaction.glow_floor", r.glow_floor),
            ("reaction.glow_baseline", r.glow_baseline),
        ] {
            check(field, value, (0.0..=1.0).contains(&value), "[0, 1]")?;
        }

        let pt = &self.particles;
        unit("particles.smoke_drag_x", pt.smoke_drag_x)?;
        unit("particles.smoke_drag_y", pt.smoke_drag_y)?;
        positive("particles.droplet_life", pt.droplet_life)?;
        non_negative("particles.burner_smoke_rate", pt.burner_smoke_rate)?;

        positive("burner.flame_frame_interval", self.burner.flame_frame_interval)?;
        if self.burner.flame_frame_count == 0 {
            return Err(TunablesError::NoFlameFrames);
        }

        positive("dropper.drip_interval", self.dropper.drip_interval)?;
        non_negative("dropper.droplet_volume", self.dropper.droplet_volume)?;

        positive("clock.max_dt", self.clock.max_dt)?;
        check(
            "clock.fallback_dt",
            self.clock.fallback_dt,
            self.clock.fallback_dt > 0.0 && self.clock.fallback_dt <= self.clock.max_dt,
            "(0, clock.max_dt]",
        )?;

        Ok(())
    }
}
