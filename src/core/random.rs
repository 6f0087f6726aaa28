use rand::Rng;

/// Source of uniform draws consumed by the generator.
///
/// Every `rand::Rng` is a `RandomSource`, so a seeded `StdRng` gives reproducible fields
/// and `thread_rng()` gives a fresh one each call.
pub trait RandomSource {
    /// A value sampled uniformly from `[low, high)`.
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    #[inline]
    fn unit(&mut self) -> f32 {
        self.uniform(0.0, 1.0)
    }

    /// `+1.0` or `-1.0` with equal probability.
    #[inline]
    fn sign(&mut self) -> f32 {
        if self.unit() < 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        // gen::<f32>() is in [0, 1) so an empty range collapses to `low` instead of panicking
        low + (high - low) * self.gen::<f32>()
    }
}

/// Replays a fixed list of unit draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "SequenceSource needs at least one value");
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value` for `uniform(0, 1)`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        let unit = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        low + (high - low) * unit
    }
}
