//! # benchlab - headless runner for the gesture-driven chemistry lab
//!
//! Loads layered configuration, offers the toolbar spawn gate and runs RON
//! scenarios (scripted hand input) against a [`benchlab_core::Lab`].

pub mod config;
pub mod scenario;
pub mod toolbar;

pub use benchlab_core::chemistry;
pub use benchlab_core::entity;
pub use benchlab_core::simulation;

pub use config::LabConfig;
pub use toolbar::{SpawnCooldown, Toolbar};

impl From<&LabConfig> for scenario::ScenarioExecutorConfig {
    fn from(config: &LabConfig) -> Self {
        Self {
            frame_dt: config.run.frame_dt,
            seed: config.run.seed,
            spawn_cooldown: config.toolbar.spawn_cooldown,
            verbose: false,
        }
    }
}
