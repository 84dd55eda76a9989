//! Random scatterer placement and amplitude sampling.
//!
//! This module defines the [`PositionSampling`] trait used to propose scatterer positions in the
//! unit square, the amplitude/phase [`Distribution`]s, and the [`ScattererFieldGenerator`] that
//! combines both to populate a complex scatterer field.
use mint::Vector2;
use rand::RngCore;

pub mod distribution;
pub mod generator;
pub mod normalized;
pub mod uniform_random;

pub use distribution::{AmplitudeLaw, Distribution};
pub use generator::ScattererFieldGenerator;
pub use normalized::NormalizedUniformSampling;
pub use uniform_random::UniformRandomSampling;

/// Trait for scatterer position sampling.
///
/// Implementors return `count` positions with both components in `[0, 1]`; the generator maps
/// them onto grid indices.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Vector2<f64>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Map a unit-interval coordinate onto `[0, extent - 1]`, rounding half to even.
#[inline]
pub(crate) fn unit_to_index(value: f64, extent: usize) -> i32 {
    if extent == 0 {
        return 0;
    }
    ((extent - 1) as f64 * value).round_ties_even() as i32
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// RNG that returns the same word forever.
    pub struct FixedRng {
        pub value: u64,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.value >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }
}
