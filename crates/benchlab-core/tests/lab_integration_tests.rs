//! End-to-end tests driving a whole lab through scripted hand input

use benchlab_core::chemistry::{Rgb, ToolKind};
use benchlab_core::entity::{HandInput, HandLabel, HandState, ObjectId};
use benchlab_core::simulation::{GrabSystem, MotionSystem, PhysicsSystem};
use benchlab_core::tunables::Tunables;
use benchlab_core::{Lab, LabStats, NoopStats};
use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

const FRAME: Vec2 = Vec2::new(1280.0, 720.0);
const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct CountingStats {
    grabs: u32,
    releases: u32,
    pours: u32,
    poured: f32,
    triggered: Vec<String>,
    expired: u32,
}

impl LabStats for CountingStats {
    fn record_grab(&mut self) {
        self.grabs += 1;
    }

    fn record_release(&mut self) {
        self.releases += 1;
    }

    fn record_pour(&mut self, volume: f32) {
        self.pours += 1;
        self.poured += volume;
    }

    fn record_reaction_triggered(&mut self, name: &str) {
        self.triggered.push(name.to_string());
    }

    fn record_reaction_expired(&mut self) {
        self.expired += 1;
    }

    fn record_particles_spawned(&mut self, _count: usize) {}
}

struct Bench {
    lab: Lab,
    frame: Vec2,
    hands: HandInput,
    stats: CountingStats,
    rng: Xoshiro256StarStar,
}

impl Bench {
    fn new() -> Self {
        Self::with_frame(FRAME)
    }

    fn with_frame(frame: Vec2) -> Self {
        let mut lab = Lab::default();
        lab.set_frame_size(frame);
        Self {
            lab,
            frame,
            hands: HandInput::new(),
            stats: CountingStats::default(),
            rng: Xoshiro256StarStar::seed_from_u64(2024),
        }
    }

    fn tick(&mut self) {
        self.lab
            .tick(&self.hands, self.frame, DT, &mut self.stats, &mut self.rng);
    }

    fn slot_position(&self, index: usize) -> Vec2 {
        self.lab.slot(index).unwrap().position
    }

    /// A point a short drop above a slot
    fn above_slot(&self, index: usize) -> Vec2 {
        self.slot_position(index) - Vec2::new(0.0, 250.0)
    }

    /// Tick until slot 0 reacts, returning the recipe name
    fn heat_until_reaction(&mut self) -> Option<String> {
        for _ in 0..300 {
            self.tick();
            if let Some(name) = self.lab.slot(0).unwrap().reaction_name() {
                return Some(name.to_string());
            }
        }
        None
    }

    fn run(&mut self, seconds: f32) {
        let frames = (seconds / DT).round() as usize;
        for _ in 0..frames {
            self.tick();
        }
    }

    fn hand(&mut self, label: HandLabel, wrist: Vec2, pinch: bool) {
        self.hands
            .set(label, Some(HandState::at(wrist, pinch, 0.0)));
    }

    fn volume(&self, id: ObjectId) -> f32 {
        self.lab.object(id).unwrap().liquid().unwrap().volume
    }

    /// Pinch an object where it stands, carry it to `to`, let go and let it settle
    fn carry(&mut self, label: HandLabel, id: ObjectId, to: Vec2) {
        let from = self.lab.object(id).unwrap().position;
        self.hand(label, from, true);
        self.tick();
        assert_eq!(self.lab.object(id).unwrap().grabbed_by, Some(label));

        self.hand(label, to, true);
        self.run(1.0);
        self.hand(label, to, false);
        self.tick();
        assert!(!self.lab.object(id).unwrap().is_grabbed());

        self.hands.set(label, None);
        self.run(1.0);
    }
}

#[test]
fn test_neutralization_end_to_end() {
    let mut bench = Bench::new();
    let flask = bench.lab.spawn(ToolKind::Flask, Vec2::new(420.0, 300.0));
    let beaker = bench.lab.spawn(ToolKind::Beaker, Vec2::new(640.0, 300.0));

    // Both fall into their slots and pour once
    bench.run(2.0);
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(flask));
    assert_eq!(bench.lab.slot(1).unwrap().occupied_by, Some(beaker));
    assert_eq!(bench.volume(flask), 180.0);
    assert_eq!(bench.volume(beaker), 130.0);

    // Resting does not keep draining
    bench.run(1.0);
    assert_eq!(bench.volume(flask), 180.0);
    assert_eq!(bench.volume(beaker), 130.0);

    // Swap the flask out of slot 0 and the beaker in
    bench.carry(HandLabel::Left, flask, Vec2::new(200.0, 500.0));
    assert!(bench.lab.slot(0).unwrap().occupied_by.is_none());
    bench.carry(HandLabel::Right, beaker, Vec2::new(420.0, 500.0));
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(beaker));
    assert_eq!(bench.volume(beaker), 10.0);

    let sources: Vec<_> = bench.lab.slot(0).unwrap().sources().into_iter().collect();
    assert_eq!(sources, vec![ToolKind::Flask, ToolKind::Beaker]);
    assert!(!bench.lab.slot(0).unwrap().is_reacting());

    // A lit burner beneath the slot heats it until it reacts
    let burner = bench.lab.spawn(ToolKind::Burner, Vec2::new(420.0, 300.0));
    let mut start = None;
    for _ in 0..300 {
        bench.tick();
        if let Some(reaction) = &bench.lab.slot(0).unwrap().reaction {
            start = Some(reaction.start);
            break;
        }
    }
    let start = start.expect("reaction should trigger under the burner");
    let slot = bench.lab.slot(0).unwrap();
    assert_eq!(slot.reaction_name(), Some("Neutralization"));
    assert_eq!(slot.reaction_result.as_ref().unwrap().name, "Neutralization");
    assert_eq!(bench.stats.triggered, vec!["Neutralization".to_string()]);

    // Runs for exactly the reaction duration
    loop {
        bench.tick();
        let elapsed = bench.lab.time() - start;
        let slot = bench.lab.slot(0).unwrap();
        if elapsed >= 3.5 {
            assert!(slot.reaction.is_none());
            assert!(slot.reaction_result.is_none());
            break;
        }
        assert!(slot.is_reacting());
    }
    assert_eq!(bench.stats.expired, 1);

    // Contents moved toward the Neutralization green
    let green = Rgb::new(120.0, 220.0, 120.0);
    let mixed = bench.lab.slot(0).unwrap().contents[0].color;
    assert!(mixed.distance_sq(green) < Rgb::new(0.0, 120.0, 255.0).distance_sq(green) * 0.01);

    // With the flame off nothing restarts
    assert!(bench.lab.set_flame(burner, false));
    bench.run(3.0);
    assert!(!bench.lab.slot(0).unwrap().is_reacting());

    assert_eq!(bench.stats.pours, 3);
    assert_eq!(bench.stats.poured, 360.0);
    assert_eq!(bench.stats.grabs, 2);
    assert_eq!(bench.stats.releases, 2);
}

/// Fill slot 0 with flask and beaker liquid using only slot-relative positions
fn pour_flask_and_beaker(bench: &mut Bench) -> (ObjectId, ObjectId) {
    let flask = bench.lab.spawn(ToolKind::Flask, bench.above_slot(0));
    // Slot 2 keeps the beaker out of grab range of the flask's new spot
    let beaker = bench.lab.spawn(ToolKind::Beaker, bench.above_slot(2));
    bench.run(2.0);
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(flask), "frame {:?}", bench.frame);
    assert_eq!(bench.lab.slot(2).unwrap().occupied_by, Some(beaker), "frame {:?}", bench.frame);

    // Between two slots is outside both windows
    let between = (bench.slot_position(0) + bench.slot_position(1)) * 0.5 - Vec2::new(0.0, 80.0);
    bench.carry(HandLabel::Left, flask, between);
    bench.carry(HandLabel::Right, beaker, bench.slot_position(0) - Vec2::new(0.0, 80.0));
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(beaker), "frame {:?}", bench.frame);
    (flask, beaker)
}

#[test]
fn test_neutralization_at_other_frame_sizes() {
    for frame in [Vec2::new(640.0, 480.0), Vec2::new(2560.0, 1440.0)] {
        let mut bench = Bench::with_frame(frame);
        let (flask, beaker) = pour_flask_and_beaker(&mut bench);
        assert_eq!(bench.volume(flask), 180.0);
        assert_eq!(bench.volume(beaker), 10.0);
        assert!(bench.lab.slot(1).unwrap().occupied_by.is_none());
        assert!(bench.lab.slot(2).unwrap().occupied_by.is_none());

        bench.lab.spawn(ToolKind::Burner, bench.above_slot(0));
        assert_eq!(
            bench.heat_until_reaction().as_deref(),
            Some("Neutralization"),
            "frame {:?}",
            frame
        );
        assert_eq!(bench.stats.pours, 3);
        assert_eq!(bench.stats.poured, 360.0);
    }
}

#[test]
fn test_frame_resize_keeps_occupancy_and_heat() {
    let mut bench = Bench::new();
    let (_, beaker) = pour_flask_and_beaker(&mut bench);
    assert_eq!(bench.stats.pours, 3);

    // A shorter camera frame lifts the slot row and the floor together
    bench.frame = Vec2::new(1280.0, 600.0);
    bench.tick();
    let slot = bench.lab.slot(0).unwrap();
    assert_eq!(slot.position.y, 480.0);
    assert_eq!(slot.occupied_by, Some(beaker));
    let rest = bench.lab.object(beaker).unwrap().position;
    assert!((rest.y - slot.position.y).abs() <= 60.0);

    bench.run(0.5);
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(beaker));
    assert_eq!(bench.stats.pours, 3);

    bench.lab.spawn(ToolKind::Burner, bench.above_slot(0));
    assert_eq!(bench.heat_until_reaction().as_deref(), Some("Neutralization"));
    assert!(bench.lab.slot(0).unwrap().heated_since.is_some());
}

#[test]
fn test_occupancy_is_rederived_every_tick() {
    let mut bench = Bench::new();
    let flask = bench.lab.spawn(ToolKind::Flask, Vec2::new(420.0, 300.0));
    bench.run(2.0);
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(flask));

    assert!(bench.lab.place(flask, Vec2::new(100.0, 576.0)));
    bench.tick();
    assert!(bench.lab.slot(0).unwrap().occupied_by.is_none());

    // Coming back is a new occupancy, so it pours again
    assert!(bench.lab.place(flask, Vec2::new(420.0, 576.0)));
    bench.tick();
    assert_eq!(bench.lab.slot(0).unwrap().occupied_by, Some(flask));
    assert_eq!(bench.volume(flask), 60.0);
    assert_eq!(bench.lab.slot(0).unwrap().contents.len(), 2);
}

#[test]
fn test_single_source_never_reacts() {
    let mut bench = Bench::new();
    let flask = bench.lab.spawn(ToolKind::Flask, Vec2::new(420.0, 300.0));
    bench.lab.spawn(ToolKind::Burner, Vec2::new(420.0, 300.0));
    bench.run(2.0);

    // Refill and re-pour from the same source
    bench.lab.place(flask, Vec2::new(100.0, 576.0));
    bench.tick();
    bench.lab.place(flask, Vec2::new(420.0, 576.0));
    bench.run(4.0);

    let slot = bench.lab.slot(0).unwrap();
    assert_eq!(slot.contents.len(), 2);
    assert!(slot.heated_since.is_some());
    assert!(!slot.is_reacting());
    assert!(bench.stats.triggered.is_empty());
}

#[test]
fn test_dropper_and_flask_make_generic_mix() {
    let mut bench = Bench::new();
    bench.lab.spawn(ToolKind::Flask, Vec2::new(420.0, 300.0));
    let dropper = bench.lab.spawn(ToolKind::Dropper, Vec2::new(100.0, 300.0));
    bench.run(2.0);

    // Hold the dropper over slot 0 for about a second
    let rest = bench.lab.object(dropper).unwrap().position;
    bench.hand(HandLabel::Right, rest, true);
    bench.tick();
    bench.hand(HandLabel::Right, Vec2::new(420.0, 400.0), true);
    bench.run(1.0);

    let slot = bench.lab.slot(0).unwrap();
    let dripped: f32 = slot
        .contents
        .iter()
        .filter(|c| c.source == ToolKind::Dropper)
        .map(|c| c.volume)
        .sum();
    assert!((15.0..=20.0).contains(&dripped));
    assert_eq!(slot.contents.len(), 2);

    bench.lab.spawn(ToolKind::Burner, Vec2::new(420.0, 300.0));
    bench.run(2.5);
    assert_eq!(
        bench.lab.slot(0).unwrap().reaction_name(),
        Some("Generic Heated Mix")
    );
}

#[test]
fn test_release_at_grab_instant_is_nan_free() {
    let tunables = Tunables::default();
    let tools = benchlab_core::chemistry::Tools::new();
    let mut objects = vec![benchlab_core::entity::WorldObject::from_def(
        ObjectId(0),
        tools.get(ToolKind::Flask),
        Vec2::new(300.0, 300.0),
        false,
    )];
    objects[0].angular_velocity = 0.3;

    let mut hands = HandInput::new();
    hands.set(
        HandLabel::Left,
        Some(HandState::at(Vec2::new(310.0, 300.0), true, 1.2)),
    );
    GrabSystem::update(&mut objects, &hands, 0.0, &tunables.grab, &mut NoopStats);
    assert!(objects[0].is_grabbed());

    hands.set(
        HandLabel::Left,
        Some(HandState::at(Vec2::new(310.0, 300.0), false, 1.2)),
    );
    GrabSystem::update(&mut objects, &hands, 0.0, &tunables.grab, &mut NoopStats);
    assert!(!objects[0].is_grabbed());
    assert_eq!(objects[0].grab_offset, Vec2::ZERO);
    assert_eq!(objects[0].grab_angle_offset, 0.0);

    for dt in [0.0, 0.0, DT, DT] {
        PhysicsSystem::update(&mut objects, FRAME, dt, &tunables.physics, &tunables.slots);
        MotionSystem::update(&mut objects, dt, &tunables.motion);
    }
    assert!(objects[0].position.is_finite());
    assert!(objects[0].velocity.is_finite());
    assert!(objects[0].angle.is_finite());
}

#[test]
fn test_stalled_frames_do_not_blow_up() {
    let mut bench = Bench::new();
    let flask = bench.lab.spawn(ToolKind::Flask, Vec2::new(420.0, 300.0));
    for raw in [0.0, -1.0, 10.0, f32::NAN, f32::INFINITY] {
        bench
            .lab
            .tick(&HandInput::new(), FRAME, raw, &mut NoopStats, &mut bench.rng);
    }
    let obj = bench.lab.object(flask).unwrap();
    assert!(obj.position.is_finite());
    assert!((bench.lab.time() - 5.0 * DT as f64).abs() < 1e-6);
}

#[test]
fn test_same_seed_same_lab() {
    let run = || {
        let mut bench = Bench::new();
        bench.lab.spawn(ToolKind::Burner, Vec2::new(640.0, 300.0));
        bench.lab.spawn(ToolKind::TestTube, Vec2::new(860.0, 200.0));
        bench.run(1.5);
        bench.lab.snapshot()
    };
    assert_eq!(run(), run());
}
