pub mod color;
pub mod field;
pub mod galaxy;
pub mod generator;
pub mod params;
pub mod random;

pub use color::Color;
pub use field::ParticleField;
pub use galaxy::Galaxy;
pub use generator::{branch_angle, generate, ParticleFieldGenerator, PARALLEL_CHUNK};
pub use params::GenerationParameters;
pub use random::{RandomSource, SequenceSource};
