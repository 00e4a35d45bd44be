//! Execution results and reporting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use benchlab_core::LabStats;

use super::verification::VerificationResult;

/// Lab events counted over a scenario run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub grabs: usize,
    pub releases: usize,
    pub pours: usize,
    /// Total volume poured into slots
    pub volume_poured: f32,
    /// Names of triggered reactions, in order
    pub reactions: Vec<String>,
    pub reactions_expired: usize,
    pub particles_spawned: usize,
}

impl LabStats for RunStats {
    fn record_grab(&mut self) {
        self.grabs += 1;
    }

    fn record_release(&mut self) {
        self.releases += 1;
    }

    fn record_pour(&mut self, volume: f32) {
        self.pours += 1;
        self.volume_poured += volume;
    }

    fn record_reaction_triggered(&mut self, name: &str) {
        self.reactions.push(name.to_string());
    }

    fn record_reaction_expired(&mut self) {
        self.reactions_expired += 1;
    }

    fn record_particles_spawned(&mut self, count: usize) {
        self.particles_spawned += count;
    }
}

/// Wall-clock timings of a scenario run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    pub setup_duration_ms: f64,
    pub action_duration_ms: f64,
    pub verification_duration_ms: f64,

    /// Lab ticks run
    pub tick_count: usize,

    /// Mean time spent inside `Lab::tick` (milliseconds)
    pub avg_tick_ms: f64,

    /// Slowest single tick (milliseconds)
    pub peak_tick_ms: f64,

    /// Simulated seconds per wall-clock second
    pub realtime_factor: f64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold per-tick timings into count, mean and peak
    pub fn record_ticks(&mut self, tick_times_ms: &[f64]) {
        self.tick_count = tick_times_ms.len();
        if tick_times_ms.is_empty() {
            self.avg_tick_ms = 0.0;
            self.peak_tick_ms = 0.0;
            return;
        }
        self.avg_tick_ms = tick_times_ms.iter().sum::<f64>() / tick_times_ms.len() as f64;
        self.peak_tick_ms = tick_times_ms.iter().copied().fold(0.0, f64::max);
    }

    /// Set the real-time factor from simulated time and the total duration
    pub fn record_realtime(&mut self, simulated_seconds: f64) {
        self.realtime_factor = if self.total_duration_ms > 0.0 {
            simulated_seconds * 1000.0 / self.total_duration_ms
        } else {
            0.0
        };
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Ticks: {} | Avg tick: {:.3}ms | Peak: {:.3}ms | {:.0}x real time",
            self.total_duration_ms,
            self.tick_count,
            self.avg_tick_ms,
            self.peak_tick_ms,
            self.realtime_factor
        )
    }
}

/// Report from scenario execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Total frames executed
    pub frames_executed: usize,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Verification failures (empty if all passed)
    pub verification_failures: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    /// Simulated lab time at the end of the run (seconds)
    pub simulated_seconds: f64,

    /// Lab events counted during the run
    pub stats: RunStats,

    /// Performance metrics (timing, throughput)
    pub performance: PerformanceMetrics,
}

impl ExecutionReport {
    /// Create new execution report
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            frames_executed: 0,
            actions_executed: 0,
            verification_failures: Vec::new(),
            log: Vec::new(),
            simulated_seconds: 0.0,
            stats: RunStats::default(),
            performance: PerformanceMetrics::new(),
        }
    }

    /// Check if all verifications passed
    pub fn success(&self) -> bool {
        self.verification_failures.is_empty()
    }

    /// Save report to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize execution report to JSON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), json).with_context(|| {
            format!(
                "Failed to write execution report: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }

    /// Load report from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON report: {}", path.as_ref().display()))?;

        Ok(report)
    }
}
