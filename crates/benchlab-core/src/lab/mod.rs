//! The lab - orchestrates every system once per frame

#[allow(clippy::module_inception)]
mod lab;
pub mod rng_trait;
pub mod snapshot;
pub mod stats;

pub use lab::Lab;
pub use rng_trait::LabRng;
pub use snapshot::{LabSnapshot, ObjectSnapshot, ParticleSnapshot, SlotSnapshot};
pub use stats::{LabStats, NoopStats};
