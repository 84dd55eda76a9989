//! Uniform random position sampling strategy.
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{rand01, PositionSampling};

/// Uniform i.i.d. random sampling over the unit square, without edge stretching.
#[derive(Debug, Clone, Default)]
pub struct UniformRandomSampling;

impl UniformRandomSampling {
    pub fn new() -> Self {
        Self
    }
}

impl PositionSampling for UniformRandomSampling {
    fn generate(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Vector2<f64>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rand01(rng);
            let y = rand01(rng);
            out.push(Vector2 { x, y });
        }
        out
    }
}
