//! RNG trait abstraction for the lab simulation
//!
//! Particle spawning only needs a handful of draws, so the lab takes any
//! source implementing this trait:
//! - `rand::thread_rng()` for interactive runs
//! - a seeded generator for scenarios and tests

/// Random number generator trait for the lab
pub trait LabRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate random f32 in [lo, hi)
    fn gen_range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.gen_f32()
    }

    /// Generate a random whole number in [lo, hi]
    fn gen_whole(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f32;
        lo + ((self.gen_f32() * span) as u32).min(hi - lo)
    }
}

// Covers ThreadRng as well as the seeded xoshiro generators
impl<T: ?Sized + rand::Rng> LabRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }
}
