//! Lab - owns every object, slot and particle and runs the frame pipeline

use benchlab_chemistry::{RecipeRegistry, Rgb, ToolKind, Tools};
use glam::Vec2;

use super::snapshot::LabSnapshot;
use super::{LabRng, LabStats};
use crate::entity::{HandInput, Liquid, ObjectId, Particle, Slot, WorldObject};
use crate::simulation::{
    BurnerSystem, DropperSystem, GrabSystem, MotionSystem, ParticleSystem, PhysicsSystem,
    ReactionSystem, SlotSystem, sanitize_dt,
};
use crate::tunables::{Tunables, TunablesError};

/// The virtual chemistry bench
///
/// Objects are only ever appended, so an [`ObjectId`] stays valid for the
/// lifetime of the lab.
pub struct Lab {
    tunables: Tunables,
    tools: Tools,
    recipes: RecipeRegistry,

    objects: Vec<WorldObject>,
    slots: Vec<Slot>,
    particles: ParticleSystem,

    /// Simulated time in seconds, advanced by sanitized frame deltas
    time: f64,
    frame_size: Vec2,
    ticks: u64,
}

impl Default for Lab {
    fn default() -> Self {
        Self::build(Tunables::default(), RecipeRegistry::new())
    }
}

impl Lab {
    /// Create a lab with the built-in recipe table
    pub fn new(tunables: Tunables) -> Result<Self, TunablesError> {
        Self::with_recipes(tunables, RecipeRegistry::new())
    }

    pub fn with_recipes(tunables: Tunables, recipes: RecipeRegistry) -> Result<Self, TunablesError> {
        tunables.validate()?;
        Ok(Self::build(tunables, recipes))
    }

    fn build(tunables: Tunables, recipes: RecipeRegistry) -> Self {
        let slots = (0..tunables.slots.count)
            .map(|i| Slot::new(i, tunables.reaction.glow_initial))
            .collect();
        let particles = ParticleSystem::new(tunables.particles.max_particles);

        Self {
            tunables,
            tools: Tools::new(),
            recipes,
            objects: Vec::new(),
            slots,
            particles,
            time: 0.0,
            frame_size: Vec2::ZERO,
            ticks: 0,
        }
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    pub fn recipes(&self) -> &RecipeRegistry {
        &self.recipes
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(id.index())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    /// Simulated time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn frame_size(&self) -> Vec2 {
        self.frame_size
    }

    /// Lay out the slot row for a frame size without advancing time
    ///
    /// Useful before the first tick, when callers want to place objects
    /// relative to slots.
    pub fn set_frame_size(&mut self, frame_size: Vec2) {
        self.frame_size = frame_size;
        SlotSystem::layout(&mut self.slots, frame_size, &self.tunables.slots);
    }

    /// Spawn a tool at a position and return its id
    ///
    /// Burners start lit when auto-ignition is on.
    pub fn spawn(&mut self, kind: ToolKind, position: Vec2) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let def = self.tools.get(kind);
        self.objects.push(WorldObject::from_def(
            id,
            def,
            position,
            self.tunables.burner.auto_ignite,
        ));
        log::debug!("Spawned {} as {} at ({:.0}, {:.0})", kind, id, position.x, position.y);
        id
    }

    /// Turn a burner's flame on or off; false if `id` is not a burner
    pub fn set_flame(&mut self, id: ObjectId, on: bool) -> bool {
        let Some(burner) = self.objects.get_mut(id.index()).and_then(|o| o.burner_mut()) else {
            return false;
        };
        burner.flame_on = on;
        if !on {
            burner.frame_index = 0;
            burner.frame_timer = 0.0;
        }
        true
    }

    /// Replace the liquid of a container; false if `id` holds no liquid
    pub fn set_liquid(&mut self, id: ObjectId, color: Rgb, volume: f32) -> bool {
        let Some(liquid) = self.objects.get_mut(id.index()).and_then(|o| o.liquid_mut()) else {
            return false;
        };
        *liquid = Liquid {
            color,
            volume: volume.max(0.0),
        };
        true
    }

    /// Teleport an object and stop it; false if `id` is unknown
    ///
    /// A held object is released first.
    pub fn place(&mut self, id: ObjectId, position: Vec2) -> bool {
        let Some(obj) = self.objects.get_mut(id.index()) else {
            return false;
        };
        obj.release();
        obj.position = position;
        obj.velocity = Vec2::ZERO;
        obj.angular_velocity = 0.0;
        true
    }

    /// Advance the lab by one frame
    ///
    /// `raw_dt` is the wall-clock delta since the previous frame; it is
    /// sanitized before use. Returns the delta actually simulated.
    pub fn tick<R: LabRng>(
        &mut self,
        hands: &HandInput,
        frame_size: Vec2,
        raw_dt: f32,
        stats: &mut dyn LabStats,
        rng: &mut R,
    ) -> f32 {
        let dt = sanitize_dt(raw_dt, &self.tunables.clock);
        self.time += dt as f64;
        self.ticks += 1;
        self.frame_size = frame_size;

        let t = &self.tunables;

        // 1. Hands
        GrabSystem::update(&mut self.objects, hands, dt, &t.grab, stats);

        // 2. Linear then angular motion
        PhysicsSystem::update(&mut self.objects, frame_size, dt, &t.physics, &t.slots);
        MotionSystem::update(&mut self.objects, dt, &t.motion);

        // 3. Burner flames
        BurnerSystem::animate(&mut self.objects, dt, &t.burner);

        // 4. Slot layout, occupancy and pours
        SlotSystem::update(&mut self.slots, &mut self.objects, frame_size, &t.slots, stats);

        // 5. Dropper drips
        DropperSystem::update(
            &mut self.objects,
            &mut self.slots,
            &mut self.particles,
            dt,
            &t.dropper,
            &t.slots,
            &t.particles,
            rng,
            stats,
        );

        // 6. Reactions
        ReactionSystem::update(
            &mut self.slots,
            &self.objects,
            self.time,
            dt,
            &self.recipes,
            &t.reaction,
            &t.slots,
            t.physics.base_size,
            stats,
        );

        // 7. Particles
        BurnerSystem::emit_smoke(&mut self.objects, &mut self.particles, dt, &t.particles, rng, stats);
        ReactionSystem::emit_gas(&mut self.slots, &mut self.particles, dt, &t.reaction, rng, stats);
        self.particles.update(dt, &t.particles);

        log::trace!(
            "Tick {} t={:.3}s dt={:.4} particles={}",
            self.ticks,
            self.time,
            dt,
            self.particles.len()
        );

        dt
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> LabSnapshot {
        LabSnapshot {
            time: self.time,
            frame_size: self.frame_size,
            objects: self.objects.iter().map(Into::into).collect(),
            slots: self.slots.iter().map(Into::into).collect(),
            particles: self.particles.particles().iter().map(Into::into).collect(),
        }
    }
}
