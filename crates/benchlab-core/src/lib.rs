//! Frame-stepped simulation core for the benchlab chemistry sandbox
//!
//! One [`Lab`] owns every tool object, reaction slot and particle. Each call to
//! [`Lab::tick`] runs the systems in a fixed order: grab, physics, motion,
//! burners, slots, droppers, reactions, particles.

pub mod entity;
pub mod lab;
pub mod simulation;
pub mod tunables;

pub use benchlab_chemistry as chemistry;

pub use entity::{HandFilter, HandInput, HandLabel, HandState, ObjectId, RawHand};
pub use lab::{Lab, LabRng, LabSnapshot, LabStats, NoopStats};
pub use tunables::{Tunables, TunablesError};
