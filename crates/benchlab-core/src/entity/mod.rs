//! Lab entities - tool objects, slots, particles and hand input

pub mod hand_filter;
pub mod input;
pub mod object;
pub mod particle;
pub mod slot;

pub use hand_filter::{HandFilter, RawHand};
pub use input::{HandInput, HandLabel, HandState};
pub use object::{BurnerState, Liquid, ObjectId, ToolState, WorldObject};
pub use particle::{Particle, ParticleKind};
pub use slot::{ActiveReaction, ContentRecord, Slot};
