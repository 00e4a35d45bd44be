//! Lab statistics collection trait

/// Trait for collecting lab statistics
///
/// The core records events through this trait; the scenario runner supplies
/// a counting implementation for its reports.
pub trait LabStats {
    /// A hand bound an object
    fn record_grab(&mut self);

    /// A hand let go of an object
    fn record_release(&mut self);

    /// A container poured `volume` into a slot
    fn record_pour(&mut self, volume: f32);

    /// A reaction started in some slot
    fn record_reaction_triggered(&mut self, name: &str);

    /// A reaction ran out its duration
    fn record_reaction_expired(&mut self);

    /// `count` particles were spawned
    fn record_particles_spawned(&mut self, count: usize);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl LabStats for NoopStats {
    fn record_grab(&mut self) {}
    fn record_release(&mut self) {}
    fn record_pour(&mut self, _volume: f32) {}
    fn record_reaction_triggered(&mut self, _name: &str) {}
    fn record_reaction_expired(&mut self) {}
    fn record_particles_spawned(&mut self, _count: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_all_methods() {
        let mut stats = NoopStats;

        for _ in 0..100 {
            stats.record_grab();
            stats.record_release();
            stats.record_pour(120.0);
            stats.record_reaction_triggered("Neutralization");
            stats.record_reaction_expired();
            stats.record_particles_spawned(3);
        }
    }

    /// A simple implementation of LabStats for testing the trait
    #[derive(Default)]
    struct CountingStats {
        grabs: u32,
        poured: f32,
        reactions: Vec<String>,
        particles: usize,
    }

    impl LabStats for CountingStats {
        fn record_grab(&mut self) {
            self.grabs += 1;
        }

        fn record_release(&mut self) {}

        fn record_pour(&mut self, volume: f32) {
            self.poured += volume;
        }

        fn record_reaction_triggered(&mut self, name: &str) {
            self.reactions.push(name.to_string());
        }

        fn record_reaction_expired(&mut self) {}

        fn record_particles_spawned(&mut self, count: usize) {
            self.particles += count;
        }
    }

    #[test]
    fn test_counting_stats_implementation() {
        let mut stats = CountingStats::default();

        stats.record_grab();
        stats.record_grab();
        stats.record_pour(120.0);
        stats.record_pour(60.0);
        stats.record_reaction_triggered("Precipitation");
        stats.record_particles_spawned(4);

        assert_eq!(stats.grabs, 2);
        assert_eq!(stats.poured, 180.0);
        assert_eq!(stats.reactions, vec!["Precipitation".to_string()]);
        assert_eq!(stats.particles, 4);
    }
}
