use std::f32::consts::TAU;
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use super::{GenerationParameters, ParticleField, RandomSource};
use crate::error::GenerationError;

/// Particles handed to each rayon task by `generate_parallel`.
pub const PARALLEL_CHUNK: usize = 4096;

/// Builds spiral-galaxy point clouds from a validated parameter set.
#[derive(Debug, Clone)]
pub struct ParticleFieldGenerator {
    params: GenerationParameters,
}

impl ParticleFieldGenerator {
    pub fn new(params: GenerationParameters) -> Result<Self, GenerationError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    /// Generates every particle in index order from `rng`.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ParticleField {
        let start = Instant::now();
        let mut field = ParticleField::zeroed(self.params.count);
        let (positions, colors) = field.buffers_mut();

        for (index, (pos, col)) in positions
            .chunks_exact_mut(3)
            .zip(colors.chunks_exact_mut(3))
            .enumerate()
        {
            write_particle(&self.params, index, rng, pos, col);
        }

        debug!(
            "generated {} particles in {:?}",
            self.params.count,
            start.elapsed()
        );
        field
    }

    /// Generates the field on the rayon pool.
    ///
    /// The index range is cut into `PARALLEL_CHUNK`-sized partitions and each one draws from
    /// its own `StdRng` derived from `seed` and the partition index. The output depends only
    /// on `seed`, not on the number of worker threads.
    pub fn generate_parallel(&self, seed: u64) -> ParticleField {
        let start = Instant::now();
        let mut field = ParticleField::zeroed(self.params.count);
        let (positions, colors) = field.buffers_mut();
        let params = &self.params;

        positions
            .par_chunks_mut(PARALLEL_CHUNK * 3)
            .zip(colors.par_chunks_mut(PARALLEL_CHUNK * 3))
            .enumerate()
            .for_each(|(chunk, (pos_chunk, col_chunk))| {
                let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));
                let base = chunk * PARALLEL_CHUNK;
                for (offset, (pos, col)) in pos_chunk
                    .chunks_exact_mut(3)
                    .zip(col_chunk.chunks_exact_mut(3))
                    .enumerate()
                {
                    write_particle(params, base + offset, &mut rng, pos, col);
                }
            });

        debug!(
            "generated {} particles on {} threads in {:?}",
            self.params.count,
            rayon::current_num_threads(),
            start.elapsed()
        );
        field
    }
}

/// Validates `params` and generates a fresh field. Nothing is returned on failure.
pub fn generate<R: RandomSource + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<ParticleField, GenerationError> {
    Ok(ParticleFieldGenerator::new(*params)?.generate(rng))
}

/// Arm angle for a particle; arms are assigned round-robin by index.
#[inline]
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

// splitmix64 finalizer, keeps neighbouring chunk seeds decorrelated
fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    let mut z = seed.wrapping_add((chunk as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn jitter<R: RandomSource + ?Sized>(params: &GenerationParameters, rng: &mut R) -> f32 {
    let magnitude = rng.unit().powf(params.randomness_power);
    magnitude * rng.sign() * params.randomness
}

/// Draw order: radius, then magnitude and sign for x, y, z.
fn write_particle<R: RandomSource + ?Sized>(
    params: &GenerationParameters,
    index: usize,
    rng: &mut R,
    pos: &mut [f32],
    col: &mut [f32],
) {
    let radius = rng.unit() * params.radius;
    let spin_angle = radius * params.spin;
    let angle = branch_angle(index, params.branches) + spin_angle;

    let jitter_x = jitter(params, rng);
    let jitter_y = jitter(params, rng);
    let jitter_z = jitter(params, rng);

    pos[0] = angle.cos() * radius + jitter_x;
    pos[1] = jitter_y;
    pos[2] = angle.sin() * radius + jitter_z;

    let t = (radius / params.radius).clamp(0.0, 1.0);
    let color = params.inside_color.lerp(&params.outside_color, t);
    col[0] = color.r;
    col[1] = color.g;
    col[2] = color.b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, SequenceSource};

    const EPS: f32 = 1e-5;

    fn calm(count: usize) -> GenerationParameters {
        GenerationParameters::default()
            .with_count(count)
            .with_randomness(0.0)
    }

    #[test]
    fn buffers_have_three_slots_per_particle() {
        let mut rng = StdRng::seed_from_u64(3);
        for count in [1, 2, 17, 1000] {
            let params = GenerationParameters::default().with_count(count);
            let field = generate(&params, &mut rng).unwrap();
            assert_eq!(field.positions().len(), 3 * count);
            assert_eq!(field.colors().len(), 3 * count);
            assert_eq!(field.len(), count);
        }
    }

    #[test]
    fn colors_stay_between_inside_and_outside() {
        let params = GenerationParameters::default()
            .with_count(5_000)
            .with_colors(Color::new(1.0, 0.0, 1.0), Color::new(0.0, 0.0, 1.0));
        let field = generate(&params, &mut StdRng::seed_from_u64(11)).unwrap();
        for (_, color) in field.iter() {
            assert!((0.0..=1.0).contains(&color.r));
            assert_eq!(color.g, 0.0);
            assert_eq!(color.b, 1.0);
        }
    }

    #[test]
    fn zero_randomness_keeps_particles_flat() {
        let field = generate(&calm(2_000), &mut StdRng::seed_from_u64(5)).unwrap();
        for (p, _) in field.iter() {
            assert_eq!(p.y, 0.0);
            assert!(p.x.hypot(p.z) <= 5.0 + EPS);
        }
    }

    #[test]
    fn zero_randomness_puts_particles_on_their_radius() {
        // seven draws per particle: radius, then magnitude/sign for three axes
        let mut src = SequenceSource::new(vec![0.8, 0.2, 0.3, 0.4, 0.6, 0.1, 0.9]);
        let field = generate(&calm(9), &mut src).unwrap();
        assert_eq!(src.draws(), 9 * 7);
        for (p, _) in field.iter() {
            assert!((p.x.hypot(p.z) - 4.0).abs() < EPS, "{:?}", p);
        }
    }

    #[test]
    fn branches_are_assigned_round_robin() {
        assert_eq!(branch_angle(0, 5), branch_angle(5, 5));
        assert_ne!(branch_angle(0, 5), branch_angle(1, 5));

        let params = calm(10).with_branches(5);
        let field = generate(&params, &mut SequenceSource::constant(0.3)).unwrap();
        assert_eq!(field.position(0), field.position(5));
        assert_eq!(field.position(2), field.position(7));
        assert_ne!(field.position(0), field.position(1));
    }

    #[test]
    fn same_seed_gives_identical_buffers() {
        let params = GenerationParameters::default().with_count(10_000);
        let a = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());

        let c = generate(&params, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn invalid_count_or_branches_fail_without_drawing() {
        let mut src = SequenceSource::constant(0.5);
        let err = generate(&calm(0), &mut src).unwrap_err();
        assert_eq!(err.field(), "count");

        let err = generate(&calm(10).with_branches(0), &mut src).unwrap_err();
        assert_eq!(err.field(), "branches");
        assert_eq!(src.draws(), 0);
    }

    #[test]
    fn zero_magnitude_draws_keep_jitter_finite() {
        // radius, then a zero magnitude draw before every sign
        let draws = vec![0.5, 0.0, 0.2, 0.0, 0.2, 0.0, 0.2];

        let negative = calm(1).with_randomness_power(-1.0);
        let mut src = SequenceSource::new(draws.clone());
        let err = generate(&negative, &mut src).unwrap_err();
        assert_eq!(err.field(), "randomness_power");
        assert_eq!(src.draws(), 0);

        let zero_power = calm(1).with_randomness_power(0.0);
        let field = generate(&zero_power, &mut SequenceSource::new(draws.clone())).unwrap();
        assert_eq!(field.position(0).y, 0.0);

        let jittered = zero_power.with_randomness(0.3).with_randomness_power(2.0);
        let field = generate(&jittered, &mut SequenceSource::new(draws)).unwrap();
        let p = field.position(0);
        assert!(p.is_finite(), "{:?}", p);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn constant_half_draws_scenario() {
        let params = GenerationParameters {
            count: 100,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.0,
            randomness_power: 3.0,
            inside_color: Color::new(1.0, 1.0, 1.0),
            outside_color: Color::new(0.0, 0.0, 0.0),
        };
        let field = generate(&params, &mut SequenceSource::constant(0.5)).unwrap();

        let arms = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
        for i in 0..100 {
            let angle = arms[i % 3] + 2.5;
            let p = field.position(i);
            assert!((p.x - angle.cos() * 2.5).abs() < EPS);
            assert_eq!(p.y, 0.0);
            assert!((p.z - angle.sin() * 2.5).abs() < EPS);
            assert!((p.x.hypot(p.z) - 2.5).abs() < EPS);
            assert_eq!(field.color(i), Color::new(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn power_pulls_jitter_toward_zero() {
        // E[u^p] = 1 / (p + 1) for u ~ U(0, 1)
        let params = calm(50_000).with_randomness(1.0).with_randomness_power(3.0);
        let field = generate(&params, &mut StdRng::seed_from_u64(8)).unwrap();
        let mean_abs_y: f32 =
            field.iter().map(|(p, _)| p.y.abs()).sum::<f32>() / field.len() as f32;
        assert!((mean_abs_y - 0.25).abs() < 0.02, "mean |y| = {}", mean_abs_y);

        let above = field.iter().filter(|(p, _)| p.y > 0.0).count();
        assert!((above as f32 / field.len() as f32 - 0.5).abs() < 0.02);
    }

    #[test]
    fn parallel_generation_is_reproducible_per_seed() {
        let params = GenerationParameters::default().with_count(PARALLEL_CHUNK * 3 + 5);
        let generator = ParticleFieldGenerator::new(params).unwrap();
        let a = generator.generate_parallel(9);
        let b = generator.generate_parallel(9);
        assert_eq!(a, b);
        assert_eq!(a.len(), PARALLEL_CHUNK * 3 + 5);

        let c = generator.generate_parallel(10);
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn parallel_generation_respects_branch_assignment() {
        let params = calm(PARALLEL_CHUNK * 2).with_branches(4).with_spin(0.0);
        let field = ParticleFieldGenerator::new(params)
            .unwrap()
            .generate_parallel(1);
        for (i, (p, _)) in field.iter().enumerate() {
            if p.x.hypot(p.z) < 1e-3 {
                continue;
            }
            let angle = p.z.atan2(p.x).rem_euclid(TAU);
            let expected = branch_angle(i, 4);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-3 || (TAU - diff) < 1e-3, "index {}: {} vs {}", i, angle, expected);
        }
    }

    #[test]
    fn chunk_seeds_differ() {
        assert_ne!(chunk_seed(0, 0), chunk_seed(0, 1));
        assert_ne!(chunk_seed(0, 0), chunk_seed(1, 0));
    }
}
