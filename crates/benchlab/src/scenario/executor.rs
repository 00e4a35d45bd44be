//! Scenario execution engine

use anyhow::{Result, bail};
use benchlab_core::chemistry::Rgb;
use benchlab_core::{HandFilter, HandInput, HandLabel, HandState, Lab, ObjectId, RawHand};
use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::{ExecutionReport, RunStats};
use super::verification::VerificationCondition;
use crate::toolbar::{SpawnCooldown, Toolbar};

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Frame delta fed to every tick (seconds)
    pub frame_dt: f32,

    /// Seed for the lab's particle jitter
    pub seed: u64,

    /// Toolbar spawn cooldown (seconds)
    pub spawn_cooldown: f64,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            frame_dt: 1.0 / 60.0,
            seed: 42,
            spawn_cooldown: 0.7,
            verbose: false,
        }
    }
}

/// Executes scenario actions against a lab
pub struct ScenarioExecutor {
    /// Configuration
    config: ScenarioExecutorConfig,

    /// Hands fed to the lab on the next tick
    hands: HandInput,

    /// Camera-side smoothing for `Landmarks` actions
    filter: HandFilter,

    toolbar: Toolbar,

    rng: Xoshiro256StarStar,

    stats: RunStats,

    /// Current frame counter (for timing)
    frame_count: usize,

    /// Action execution log
    log: Vec<String>,

    /// Time spent inside each lab tick (milliseconds)
    tick_times: Vec<f64>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        let toolbar = Toolbar::new(SpawnCooldown::new(config.spawn_cooldown));
        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        Self {
            config,
            hands: HandInput::new(),
            filter: HandFilter::new(),
            toolbar,
            rng,
            stats: RunStats::default(),
            frame_count: 0,
            log: Vec::new(),
            tick_times: Vec::new(),
        }
    }

    /// Execute a complete scenario
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        lab: &mut Lab,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log.clear();
        self.hands = HandInput::new();
        self.filter = HandFilter::new();
        self.toolbar = Toolbar::new(SpawnCooldown::new(self.config.spawn_cooldown));
        self.rng = Xoshiro256StarStar::seed_from_u64(self.config.seed);
        self.stats = RunStats::default();
        self.frame_count = 0;
        self.tick_times.clear();

        self.log(&format!("Starting scenario: {}", scenario.name));
        self.log(&format!("Description: {}", scenario.description));

        if let Some(frame_size) = scenario.frame_size {
            lab.set_frame_size(frame_size);
        }

        // Execute setup actions
        let setup_start = Instant::now();
        if !scenario.setup.is_empty() {
            self.log(&format!("Running {} setup actions", scenario.setup.len()));
            for (idx, action) in scenario.setup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, lab) {
                    let msg = format!("Setup action {} failed: {}", idx, e);
                    self.log(&msg);
                    report.log = self.log.clone();
                    return Err(anyhow::anyhow!(msg));
                }
            }
        }
        report.performance.setup_duration_ms = setup_start.elapsed().as_secs_f64() * 1000.0;

        // Execute main actions
        let action_start = Instant::now();
        self.log(&format!("Running {} main actions", scenario.actions.len()));
        for (idx, action) in scenario.actions.iter().enumerate() {
            if let Err(e) = self.execute_action(action, lab) {
                let msg = format!("Action {} failed: {}", idx, e);
                self.log(&msg);
                report.log = self.log.clone();
                return Err(anyhow::anyhow!(msg));
            }
        }
        report.performance.action_duration_ms = action_start.elapsed().as_secs_f64() * 1000.0;

        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        // Run verifications
        let verify_start = Instant::now();
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(lab);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }
        report.performance.verification_duration_ms = verify_start.elapsed().as_secs_f64() * 1000.0;

        // Cleanup actions (always run)
        if !scenario.cleanup.is_empty() {
            self.log(&format!(
                "Running {} cleanup actions",
                scenario.cleanup.len()
            ));
            for (idx, action) in scenario.cleanup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, lab) {
                    self.log(&format!("Warning: Cleanup action {} failed: {}", idx, e));
                }
            }
        }

        // Finalize report
        report.frames_executed = self.frame_count;
        report.simulated_seconds = lab.time();
        report.stats = self.stats.clone();
        report.passed = report.verification_failures.is_empty();

        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        report.performance.record_ticks(&self.tick_times);
        report.performance.record_realtime(report.simulated_seconds);

        self.log(&format!(
            "Scenario complete: {} ({} frames, {:.2}s simulated, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            self.frame_count,
            report.simulated_seconds,
            report.performance.total_duration_ms
        ));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, lab: &mut Lab) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Frame {}] {:?}", self.frame_count, action));
        }

        match action {
            ScenarioAction::SpawnTool { tool, x, y } => {
                let id = lab.spawn(*tool, Vec2::new(*x, *y));
                self.log(&format!("  Spawned {} as object {} at ({}, {})", tool, id.index(), x, y));
            }

            ScenarioAction::ToolbarSpawn { tool } => {
                let now = lab.time();
                match self.toolbar.request_spawn(lab, *tool, now) {
                    Some(id) => self.log(&format!(
                        "  Toolbar spawned {} as object {}",
                        tool,
                        id.index()
                    )),
                    None => self.log(&format!("  Toolbar cooling down, {} not spawned", tool)),
                }
            }

            ScenarioAction::SetLiquid {
                object,
                color,
                volume,
            } => {
                if !lab.set_liquid(ObjectId(*object), Rgb::from(*color), *volume) {
                    bail!("Object {} does not hold liquid", object);
                }
                self.log(&format!("  Set object {} liquid to {:?} x {}", object, color, volume));
            }

            ScenarioAction::SetFlame { object, on } => {
                if !lab.set_flame(ObjectId(*object), *on) {
                    bail!("Object {} is not a burner", object);
                }
                self.log(&format!(
                    "  Turned object {} flame {}",
                    object,
                    if *on { "on" } else { "off" }
                ));
            }

            ScenarioAction::PlaceObject { object, x, y } => {
                if !lab.place(ObjectId(*object), Vec2::new(*x, *y)) {
                    bail!("Object {} does not exist", object);
                }
                self.log(&format!("  Placed object {} at ({}, {})", object, x, y));
            }

            ScenarioAction::Hand {
                hand,
                x,
                y,
                pinch,
                angle,
                frames,
            } => {
                self.hands
                    .set(*hand, Some(HandState::at(Vec2::new(*x, *y), *pinch, *angle)));
                self.simulate_frames(lab, *frames);
                self.log(&format!(
                    "  {} hand at ({}, {}){} for {} frames",
                    hand,
                    x,
                    y,
                    if *pinch { " pinching" } else { "" },
                    frames
                ));
            }

            ScenarioAction::MoveHand {
                hand,
                x,
                y,
                pinch,
                angle,
                frames,
            } => {
                self.move_hand(lab, *hand, Vec2::new(*x, *y), *pinch, *angle, *frames);
                self.log(&format!(
                    "  Moved {} hand to ({}, {}) over {} frames",
                    hand, x, y, frames
                ));
            }

            ScenarioAction::HideHand { hand } => {
                self.hands.set(*hand, None);
                self.log(&format!("  {} hand out of view", hand));
            }

            ScenarioAction::Landmarks {
                hand,
                wrist,
                index_tip,
                thumb_tip,
                index_mcp,
                frames,
            } => {
                let raw = RawHand {
                    wrist: Vec2::from(*wrist),
                    index_tip: Vec2::from(*index_tip),
                    thumb_tip: Vec2::from(*thumb_tip),
                    index_mcp: Vec2::from(*index_mcp),
                };
                for _ in 0..*frames {
                    let input = self.filter.process(&[(*hand, raw)], lab.frame_size());
                    self.hands.set(*hand, input.get(*hand).copied());
                    self.simulate_frames(lab, 1);
                }
                let outcome = match self.hands.get(*hand) {
                    Some(state) if state.pinch => "pinching",
                    Some(_) => "open",
                    None => "rejected",
                };
                self.log(&format!(
                    "  {} hand landmarks for {} frames ({})",
                    hand, frames, outcome
                ));
            }

            // Control flow
            ScenarioAction::WaitFrames { frames } => {
                self.simulate_frames(lab, *frames);
                self.log(&format!("  Waited {} frames", frames));
            }

            ScenarioAction::WaitSeconds { seconds } => {
                let frames = self.frames_for(*seconds);
                self.simulate_frames(lab, frames);
                self.log(&format!("  Waited {}s ({} frames)", seconds, frames));
            }

            ScenarioAction::WaitUntil {
                condition,
                timeout_frames,
            } => {
                self.wait_until(lab, condition, *timeout_frames)?;
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  [USER] {}", message));
            }

            ScenarioAction::Sequence { actions } => {
                self.log(&format!("  Sequence: {} actions", actions.len()));
                for action in actions {
                    self.execute_action(action, lab)?;
                }
            }
        }

        Ok(())
    }

    /// Ease a hand from its last pose to a target, one tick per step
    ///
    /// A hand that is not in view starts at the target.
    fn move_hand(
        &mut self,
        lab: &mut Lab,
        hand: HandLabel,
        target: Vec2,
        pinch: bool,
        angle: f32,
        frames: usize,
    ) {
        let (from, from_angle) = self
            .hands
            .get(hand)
            .map_or((target, angle), |h| (h.wrist, h.angle));

        if frames == 0 {
            self.hands.set(hand, Some(HandState::at(target, pinch, angle)));
            return;
        }

        for step in 1..=frames {
            let t = step as f32 / frames as f32;
            let wrist = from.lerp(target, t);
            let a = from_angle + (angle - from_angle) * t;
            self.hands.set(hand, Some(HandState::at(wrist, pinch, a)));
            self.simulate_frames(lab, 1);
        }
    }

    fn wait_until(
        &mut self,
        lab: &mut Lab,
        condition: &VerificationCondition,
        timeout_frames: usize,
    ) -> Result<()> {
        for frame in 0..=timeout_frames {
            let result = condition.evaluate(lab);
            if result.passed {
                self.log(&format!("  Condition met after {} frames", frame));
                return Ok(());
            }
            if frame < timeout_frames {
                self.simulate_frames(lab, 1);
            }
        }

        let result = condition.evaluate(lab);
        bail!(
            "Timeout after {} frames waiting for: {}",
            timeout_frames,
            result.message
        )
    }

    fn frames_for(&self, seconds: f32) -> usize {
        if seconds <= 0.0 || self.config.frame_dt <= 0.0 {
            return 0;
        }
        (seconds / self.config.frame_dt).round() as usize
    }

    fn simulate_frames(&mut self, lab: &mut Lab, frames: usize) {
        for _ in 0..frames {
            let frame_size = lab.frame_size();
            let tick_start = Instant::now();
            lab.tick(
                &self.hands,
                frame_size,
                self.config.frame_dt,
                &mut self.stats,
                &mut self.rng,
            );
            self.tick_times
                .push(tick_start.elapsed().as_secs_f64() * 1000.0);
            self.frame_count += 1;
        }
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}
