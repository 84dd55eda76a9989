//! Uniform position sampling stretched to touch both edges of the unit square.
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{rand01, PositionSampling};

/// Uniform draws in `[0, 1)` per axis, shifted so the minimum is 0 and rescaled so the maximum
/// is 1.
///
/// With at least two distinct draws per axis, one position lands on each axis extreme. The
/// result is not an independent uniform sample: draws are compressed towards the edges.
#[derive(Debug, Clone, Default)]
pub struct NormalizedUniformSampling;

impl NormalizedUniformSampling {
    pub fn new() -> Self {
        Self
    }
}

/// Shift `values` so the minimum is 0, then divide by the resulting maximum magnitude.
///
/// A constant axis (including a single draw) collapses to all zeros.
fn stretch_to_unit(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    for v in values.iter_mut() {
        *v -= min;
    }
    let max = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    if max > 0.0 {
        for v in values.iter_mut() {
            *v /= max;
        }
    }
}

impl PositionSampling for NormalizedUniformSampling {
    fn generate(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Vector2<f64>> {
        if count == 0 {
            return Vec::new();
        }

        let mut xs: Vec<f64> = (0..count).map(|_| rand01(rng)).collect();
        let mut ys: Vec<f64> = (0..count).map(|_| rand01(rng)).collect();
        stretch_to_unit(&mut xs);
        stretch_to_unit(&mut ys);

        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Vector2 { x, y })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_for_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(NormalizedUniformSampling::new()
            .generate(0, &mut rng)
            .is_empty());
    }

    #[test]
    fn both_extremes_are_reached_on_each_axis() {
        let mut rng = StdRng::seed_from_u64(42);
        let pts = NormalizedUniformSampling::new().generate(50, &mut rng);
        assert_eq!(pts.len(), 50);

        for p in &pts {
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
        assert!(pts.iter().any(|p| p.x == 0.0));
        assert!(pts.iter().any(|p| p.x == 1.0));
        assert!(pts.iter().any(|p| p.y == 0.0));
        assert!(pts.iter().any(|p| p.y == 1.0));
    }

    #[test]
    fn single_draw_collapses_to_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let pts = NormalizedUniformSampling::new().generate(1, &mut rng);
        assert_eq!(pts.len(), 1);
        assert_eq!((pts[0].x, pts[0].y), (0.0, 0.0));
    }

    #[test]
    fn stretch_rescales_to_unit_interval() {
        let mut values = vec![0.25, 0.5, 0.75];
        stretch_to_unit(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn determinism_for_same_seed() {
        let s = NormalizedUniformSampling::new();
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let pa: Vec<(f64, f64)> = s
            .generate(32, &mut rng_a)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect();
        let pb: Vec<(f64, f64)> = s
            .generate(32, &mut rng_b)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(pa, pb);
    }
}
