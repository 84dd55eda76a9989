//! Generation of the random complex scatterer field.
use num_complex::Complex64;
use rand::RngCore;
use tracing::debug;

use crate::config::Configuration;
use crate::error::Result;
use crate::geometry::Grid;
use crate::sampling::{unit_to_index, Distribution, NormalizedUniformSampling, PositionSampling};

/// Progress is logged every this many scatterers when verbose.
const PROGRESS_INTERVAL: usize = 10_000;

/// Draws `k = round(density% · rows · cols)` complex scatterers and writes them into a field.
///
/// Positions come from a [`PositionSampling`] strategy in the unit square and are mapped to
/// `round((extent - 1) · v)` on each axis. Scatterers that land on the same cell overwrite
/// each other in draw order, so the number of non-zero cells can be lower than `k`.
pub struct ScattererFieldGenerator {
    pub distribution: Distribution,
    /// Target share of cells holding a scatterer, in percent.
    pub density_percent: f64,
    pub sampling: Box<dyn PositionSampling>,
    pub verbose: bool,
}

impl ScattererFieldGenerator {
    /// Create a generator using [`NormalizedUniformSampling`] for positions.
    pub fn new(distribution: Distribution, density_percent: f64) -> Self {
        Self {
            distribution,
            density_percent,
            sampling: Box::new(NormalizedUniformSampling::new()),
            verbose: false,
        }
    }

    /// Create a generator from the distribution, density and verbosity of `config`.
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(config.distribution, config.density_percent).with_verbose(config.verbose)
    }

    /// Replace the position sampling strategy.
    pub fn with_sampling<S: PositionSampling + 'static>(mut self, sampling: S) -> Self {
        self.sampling = Box::new(sampling);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Absolute number of scatterers drawn for a `cols × rows` field.
    pub fn scatterer_count(&self, cols: usize, rows: usize) -> usize {
        let k = (self.density_percent / 100.0) * rows as f64 * cols as f64;
        k.max(0.0).round_ties_even() as usize
    }

    /// Draw scatterers and write them into `field`, returning how many were drawn.
    pub fn populate(&self, field: &mut Grid<Complex64>, rng: &mut dyn RngCore) -> Result<usize> {
        let (cols, rows) = field.size();
        let k = self.scatterer_count(cols, rows);
        if k == 0 {
            return Ok(0);
        }
        let law = self.distribution.law()?;

        debug!(
            "Using distribution {} for {} scatterers.",
            self.distribution, k
        );

        let positions = self.sampling.generate(k, rng);
        for (i, p) in positions.iter().enumerate() {
            if self.verbose && i % PROGRESS_INTERVAL == 0 {
                debug!("Storing scatterer {}/{}.", i, k);
            }
            let scatterer = law.scatterer(rng);
            let x = unit_to_index(p.x, cols);
            let y = unit_to_index(p.y, rows);
            if let Some(cell) = field.get_mut(x, y) {
                *cell = scatterer;
            }
        }

        Ok(positions.len())
    }

    /// Create a zero field of `cols × rows` and populate it.
    pub fn generate(
        &self,
        cols: usize,
        rows: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Grid<Complex64>> {
        let mut field = Grid::new(cols, rows);
        self.populate(&mut field, rng)?;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::UniformRandomSampling;

    fn non_zero(field: &Grid<Complex64>) -> usize {
        field.iter().filter(|v| v.norm() != 0.0).count()
    }

    #[test]
    fn count_follows_density() {
        let generator = ScattererFieldGenerator::new(Distribution::Uniform, 50.0);
        assert_eq!(generator.scatterer_count(10, 10), 50);
        assert_eq!(generator.scatterer_count(3, 3), 4); // 4.5 rounds to even

        let full = ScattererFieldGenerator::new(Distribution::Uniform, 100.0);
        assert_eq!(full.scatterer_count(7, 3), 21);

        let none = ScattererFieldGenerator::new(Distribution::Uniform, 0.0);
        assert_eq!(none.scatterer_count(7, 3), 0);
    }

    #[test]
    fn populated_cells_never_exceed_drawn_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let generator = ScattererFieldGenerator::new(Distribution::Rayleigh, 100.0);
        let field = generator.generate(16, 12, &mut rng).unwrap();
        let filled = non_zero(&field);
        assert!(filled > 0);
        assert!(filled <= 16 * 12);
    }

    #[test]
    fn scatterers_reach_every_border() {
        let mut rng = StdRng::seed_from_u64(21);
        let generator = ScattererFieldGenerator::new(Distribution::Gaussian, 20.0);
        let field = generator.generate(20, 10, &mut rng).unwrap();

        let column_has = |x: i32| (0..10).any(|y| field.get(x, y).unwrap().norm() != 0.0);
        let row_has = |y: i32| (0..20).any(|x| field.get(x, y).unwrap().norm() != 0.0);
        assert!(column_has(0));
        assert!(column_has(19));
        assert!(row_has(0));
        assert!(row_has(9));
    }

    #[test]
    fn populate_overwrites_only_sampled_cells() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = Grid::filled(8, 8, Complex64::new(3.0, 0.0));
        let generator = ScattererFieldGenerator::new(Distribution::Uniform, 10.0)
            .with_sampling(UniformRandomSampling::new());
        let drawn = generator.populate(&mut field, &mut rng).unwrap();
        assert_eq!(drawn, 6);
        let untouched = field
            .iter()
            .filter(|v| **v == Complex64::new(3.0, 0.0))
            .count();
        assert!(untouched >= 64 - 6);
    }

    #[test]
    fn same_seed_same_field() {
        let generator = ScattererFieldGenerator::new(Distribution::Uniform, 30.0);
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        assert_eq!(
            generator.generate(12, 9, &mut a).unwrap(),
            generator.generate(12, 9, &mut b).unwrap()
        );
    }
}
