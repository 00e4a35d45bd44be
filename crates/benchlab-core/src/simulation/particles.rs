//! Visual-only particle system for smoke and droplets
//! Particles never feed back into the lab state.

use benchlab_chemistry::Rgb;
use glam::Vec2;

use super::timing::per_frame_decay;
use crate::entity::{Particle, ParticleKind};
use crate::lab::{LabRng, LabStats};
use crate::tunables::ParticleTunables;

/// Turn a continuous emission rate into whole particles for this frame,
/// carrying the fractional remainder in `accumulator`
pub fn drain_accumulator(accumulator: &mut f32, rate: f32, dt: f32) -> usize {
    *accumulator += (rate * dt).max(0.0);
    let whole = accumulator.floor();
    *accumulator -= whole;
    whole as usize
}

/// Manages the global particle list
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(ParticleTunables::default().max_particles)
    }
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            max_particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Age, prune and move all particles
    ///
    /// A particle whose life reaches zero this frame is removed in the same
    /// frame.
    pub fn update(&mut self, dt: f32, tunables: &ParticleTunables) {
        let drag = Vec2::new(
            per_frame_decay(tunables.smoke_drag_x, dt),
            per_frame_decay(tunables.smoke_drag_y, dt),
        );

        self.particles.retain_mut(|p| {
            p.life -= dt;
            if p.life <= 0.0 {
                return false;
            }

            p.position += p.velocity * dt;
            if p.kind == ParticleKind::Smoke {
                p.velocity *= drag;
            }
            true
        });
    }

    /// Add a particle, evicting the oldest one at capacity
    pub fn spawn(&mut self, particle: Particle) {
        if self.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Spawn `count` rising smoke puffs
    pub fn spawn_smoke<R: LabRng>(
        &mut self,
        position: Vec2,
        count: usize,
        rng: &mut R,
        stats: &mut dyn LabStats,
    ) {
        for _ in 0..count {
            let velocity = Vec2::new(rng.gen_range_f32(-10.0, 10.0), rng.gen_range_f32(-40.0, -20.0));
            let life = rng.gen_range_f32(1.0, 2.0);
            let size = rng.gen_whole(10, 18) as f32;
            self.spawn(Particle::new(
                ParticleKind::Smoke,
                position,
                velocity,
                life,
                size,
                Rgb::SMOKE,
            ));
        }
        if count > 0 {
            stats.record_particles_spawned(count);
        }
    }

    /// Spawn one falling droplet of the given liquid color
    pub fn spawn_droplet<R: LabRng>(
        &mut self,
        position: Vec2,
        color: Rgb,
        tunables: &ParticleTunables,
        rng: &mut R,
        stats: &mut dyn LabStats,
    ) {
        let velocity = Vec2::new(rng.gen_range_f32(-10.0, 10.0), rng.gen_range_f32(60.0, 120.0));
        self.spawn(Particle::new(
            ParticleKind::Droplet,
            position,
            velocity,
            tunables.droplet_life,
            tunables.droplet_size,
            color,
        ));
        stats.record_particles_spawned(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::NoopStats;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn smoke_at(life: f32) -> Particle {
        Particle::new(
            ParticleKind::Smoke,
            Vec2::ZERO,
            Vec2::new(10.0, -30.0),
            life,
            12.0,
            Rgb::SMOKE,
        )
    }

    #[test]
    fn test_smoke_spawn_ranges() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut system = ParticleSystem::new(500);
        system.spawn_smoke(Vec2::new(100.0, 100.0), 50, &mut rng, &mut NoopStats);

        assert_eq!(system.len(), 50);
        for p in system.particles() {
            assert_eq!(p.kind, ParticleKind::Smoke);
            assert!((-10.0..10.0).contains(&p.velocity.x));
            assert!((-40.0..-20.0).contains(&p.velocity.y));
            assert!((1.0..2.0).contains(&p.life));
            assert!((10.0..=18.0).contains(&p.size));
            assert_eq!(p.size.fract(), 0.0);
            assert_eq!(p.color, Rgb::SMOKE);
        }
    }

    #[test]
    fn test_droplet_spawn() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let mut system = ParticleSystem::new(500);
        let color = Rgb::new(170.0, 90.0, 220.0);
        system.spawn_droplet(Vec2::ZERO, color, &ParticleTunables::default(), &mut rng, &mut NoopStats);

        let p = &system.particles()[0];
        assert_eq!(p.kind, ParticleKind::Droplet);
        assert_eq!(p.life, 1.5);
        assert_eq!(p.size, 6.0);
        assert_eq!(p.color, color);
        assert!(p.velocity.y >= 60.0);
    }

    #[test]
    fn test_removed_in_same_tick_life_runs_out() {
        let mut system = ParticleSystem::new(10);
        system.spawn(smoke_at(0.5));
        system.spawn(smoke_at(0.25));

        system.update(0.25, &ParticleTunables::default());
        assert_eq!(system.len(), 1);
        assert!((system.particles()[0].life - 0.25).abs() < 1e-6);

        system.update(0.25, &ParticleTunables::default());
        assert!(system.is_empty());
    }

    #[test]
    fn test_life_decreases_monotonically() {
        let mut system = ParticleSystem::new(10);
        system.spawn(smoke_at(2.0));
        let mut last = 2.0;
        for _ in 0..50 {
            system.update(1.0 / 60.0, &ParticleTunables::default());
            let life = system.particles()[0].life;
            assert!(life < last);
            last = life;
        }
    }

    #[test]
    fn test_smoke_drag_and_droplet_linear() {
        let t = ParticleTunables::default();
        let mut system = ParticleSystem::new(10);
        system.spawn(smoke_at(2.0));
        system.spawn(Particle::new(
            ParticleKind::Droplet,
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            1.5,
            6.0,
            Rgb::WHITE,
        ));

        system.update(1.0 / 60.0, &t);

        let smoke = &system.particles()[0];
        assert!((smoke.velocity.x - 9.8).abs() < 1e-4);
        assert!((smoke.velocity.y + 29.1).abs() < 1e-4);
        let droplet = &system.particles()[1];
        assert_eq!(droplet.velocity, Vec2::new(0.0, 100.0));
        assert!((droplet.position.y - 100.0 / 60.0).abs() < 1e-5);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut system = ParticleSystem::new(3);
        for i in 0..5 {
            system.spawn(smoke_at(1.0 + i as f32));
        }
        assert_eq!(system.len(), 3);
        assert_eq!(system.particles()[0].life, 3.0);
    }

    #[test]
    fn test_drain_accumulator_carries_fraction() {
        let mut acc = 0.0;
        let total: usize = (0..60).map(|_| drain_accumulator(&mut acc, 30.0, 1.0 / 60.0)).sum();
        assert!((29..=30).contains(&total));
        assert!(acc < 1.0);
        assert_eq!(drain_accumulator(&mut acc, 0.0, 1.0), 0);
    }
}
