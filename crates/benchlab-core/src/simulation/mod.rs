//! Simulation systems - physics, grab, motion, slots, reactions, particles

pub mod burner;
pub mod dropper;
pub mod grab;
pub mod motion;
pub mod particles;
pub mod physics;
pub mod reaction;
pub mod slots;
pub mod timing;

pub use burner::BurnerSystem;
pub use dropper::DropperSystem;
pub use grab::GrabSystem;
pub use motion::MotionSystem;
pub use particles::ParticleSystem;
pub use physics::PhysicsSystem;
pub use reaction::{ReactionSystem, blend_reaction_contents, select_recipe, trigger_reaction};
pub use slots::SlotSystem;
pub use timing::{REFERENCE_HZ, per_frame_decay, per_frame_ease, sanitize_dt};
