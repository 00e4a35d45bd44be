//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `benchlab.ron` file (if exists)
//! 3. Environment variables prefixed with `BENCHLAB_`
//!
//! Example environment variable: `BENCHLAB_TUNABLES__PHYSICS__GRAVITY=600`

use anyhow::{Context, Result};
use benchlab_core::chemistry::RecipeRegistry;
use benchlab_core::{Lab, Tunables};
use config::{Config, Environment, File};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LabConfig {
    #[serde(default)]
    pub frame: FrameConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub toolbar: ToolbarConfig,

    /// Simulation constants handed to the lab
    #[serde(default)]
    pub tunables: Tunables,
}

/// Camera frame the lab is laid out in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl FrameConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Scripted run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed for particle jitter
    pub seed: u64,
    /// Frame delta fed to every scripted tick, in seconds
    pub frame_dt: f32,
    /// RON recipe table replacing the built-in one
    #[serde(default)]
    pub recipes: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_dt: 1.0 / 60.0,
            recipes: None,
        }
    }
}

/// Toolbar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Minimum seconds between two spawns
    pub spawn_cooldown: f64,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            spawn_cooldown: 0.7,
        }
    }
}

impl LabConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `benchlab.ron` file (if exists)
    /// 3. Environment variables prefixed with `BENCHLAB_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from("benchlab")
    }

    /// Same as [`LabConfig::load`] with a different config file stem
    pub fn load_from(file_name: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("frame.width", 1280.0)?
            .set_default("frame.height", 720.0)?
            .set_default("run.seed", 42_i64)?
            .set_default("run.frame_dt", 1.0 / 60.0)?
            .set_default("toolbar.spawn_cooldown", 0.7)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_name)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BENCHLAB_RUN__SEED, etc.)
            .add_source(Environment::with_prefix("BENCHLAB").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Recipe table from `run.recipes`, or the built-in one
    pub fn recipes(&self) -> Result<RecipeRegistry> {
        let Some(path) = &self.run.recipes else {
            return Ok(RecipeRegistry::new());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe table: {}", path.display()))?;
        let registry = RecipeRegistry::from_ron_str(&content)
            .with_context(|| format!("Failed to parse recipe table: {}", path.display()))?;

        log::info!(
            "Loaded {} recipes from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Build a lab from these settings, laid out for the configured frame
    pub fn build_lab(&self) -> Result<Lab> {
        let mut lab = Lab::with_recipes(self.tunables.clone(), self.recipes()?)
            .context("Invalid tunables")?;
        lab.set_frame_size(self.frame.size());
        Ok(lab)
    }
}
