use log::{debug, info, warn};

use super::{GenerationParameters, ParticleField, ParticleFieldGenerator, RandomSource};
use crate::error::GenerationError;

/// Holds the field currently on display and rebuilds it when parameters change.
///
/// At most one field is alive at a time; the previous one is dropped before the
/// next is generated.
#[derive(Debug)]
pub struct Galaxy {
    generator: ParticleFieldGenerator,
    field: Option<ParticleField>,
    generation: u64,
}

impl Galaxy {
    pub fn new(params: GenerationParameters) -> Result<Self, GenerationError> {
        Ok(Self {
            generator: ParticleFieldGenerator::new(params)?,
            field: None,
            generation: 0,
        })
    }

    pub fn params(&self) -> &GenerationParameters {
        self.generator.params()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Number of fields generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Moves the current field out, leaving nothing on display.
    pub fn take_field(&mut self) -> Option<ParticleField> {
        self.field.take()
    }

    pub fn regenerate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> &ParticleField {
        self.release();
        let field = self.generator.generate(rng);
        self.store(field)
    }

    /// Same as `regenerate` but on the rayon pool, see `ParticleFieldGenerator::generate_parallel`.
    pub fn regenerate_parallel(&mut self, seed: u64) -> &ParticleField {
        self.release();
        let field = self.generator.generate_parallel(seed);
        self.store(field)
    }

    /// Swaps in new parameters and rebuilds the field.
    ///
    /// Invalid parameters leave the current parameters and field untouched.
    pub fn set_params<R: RandomSource + ?Sized>(
        &mut self,
        params: GenerationParameters,
        rng: &mut R,
    ) -> Result<&ParticleField, GenerationError> {
        let generator = ParticleFieldGenerator::new(params).inspect_err(|e| {
            warn!("keeping previous galaxy, {}", e);
        })?;
        self.generator = generator;
        Ok(self.regenerate(rng))
    }

    fn release(&mut self) {
        if let Some(old) = self.field.take() {
            debug!("releasing field of {} particles", old.len());
        }
    }

    fn store(&mut self, field: ParticleField) -> &ParticleField {
        self.generation += 1;
        info!(
            "galaxy #{}: {} particles ({})",
            self.generation,
            field.len(),
            self.generator.params()
        );
        self.field.insert(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starts_empty() {
        let galaxy = Galaxy::new(GenerationParameters::default().with_count(10)).unwrap();
        assert!(galaxy.field().is_none());
        assert_eq!(galaxy.generation(), 0);
    }

    #[test]
    fn regenerate_replaces_the_field() {
        let mut galaxy = Galaxy::new(GenerationParameters::default().with_count(64)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let first = galaxy.regenerate(&mut rng).clone();
        let second = galaxy.regenerate(&mut rng).clone();
        assert_eq!(galaxy.generation(), 2);
        assert_ne!(first, second);
        assert_eq!(galaxy.field(), Some(&second));
    }

    #[test]
    fn set_params_rebuilds_with_new_count() {
        let mut galaxy = Galaxy::new(GenerationParameters::default().with_count(10)).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        galaxy.regenerate(&mut rng);

        let len = galaxy
            .set_params(GenerationParameters::default().with_count(25), &mut rng)
            .unwrap()
            .len();
        assert_eq!(len, 25);
        assert_eq!(galaxy.params().count, 25);
    }

    #[test]
    fn invalid_params_keep_previous_state() {
        let params = GenerationParameters::default().with_count(10);
        let mut galaxy = Galaxy::new(params).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let before = galaxy.regenerate(&mut rng).clone();

        let err = galaxy
            .set_params(params.with_branches(0), &mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "branches");
        assert_eq!(galaxy.params(), &params);
        assert_eq!(galaxy.field(), Some(&before));
        assert_eq!(galaxy.generation(), 1);
    }

    #[test]
    fn take_field_hands_ownership_out() {
        let mut galaxy = Galaxy::new(GenerationParameters::default().with_count(8)).unwrap();
        galaxy.regenerate_parallel(4);
        let field = galaxy.take_field().unwrap();
        assert_eq!(field.len(), 8);
        assert!(galaxy.field().is_none());
    }
}
