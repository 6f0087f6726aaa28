use std::fmt::{self, Display, Formatter};

use super::Color;
use crate::error::GenerationError;

/// Inputs of a single generation call.
///
/// `size` is a display hint for whoever draws the field; the generator never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    /// Number of particles.
    pub count: usize,
    /// Point size hint in world units.
    pub size: f32,
    /// Maximum distance from the center.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Radians of twist per unit of radius.
    pub spin: f32,
    /// Scale of the per-axis jitter.
    pub randomness: f32,
    /// Exponent applied to the jitter draw, > 1 pulls particles toward their arm.
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::GALAXY_CORE,
            outside_color: Color::GALAXY_RIM,
        }
    }
}

impl GenerationParameters {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_branches(mut self, branches: u32) -> Self {
        self.branches = branches;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_randomness(mut self, randomness: f32) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_randomness_power(mut self, power: f32) -> Self {
        self.randomness_power = power;
        self
    }

    pub fn with_colors(mut self, inside: Color, outside: Color) -> Self {
        self.inside_color = inside;
        self.outside_color = outside;
        self
    }

    /// Checks every constraint; the first violation is reported.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.count == 0 {
            return Err(GenerationError::invalid(
                "count",
                self.count,
                "must be greater than zero",
            ));
        }
        if self.count.checked_mul(3).is_none() {
            return Err(GenerationError::invalid(
                "count",
                self.count,
                "too many particles for a 3-component buffer",
            ));
        }
        if self.branches == 0 {
            return Err(GenerationError::invalid(
                "branches",
                self.branches,
                "must be at least 1",
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GenerationError::invalid(
                "radius",
                self.radius,
                "must be a finite value greater than zero",
            ));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(GenerationError::invalid(
                "size",
                self.size,
                "must be a finite value greater than zero",
            ));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(GenerationError::invalid(
                "randomness",
                self.randomness,
                "must be a finite, non-negative value",
            ));
        }
        // 0^-p is infinite, so a zero draw would poison the jitter
        if !(self.randomness_power.is_finite() && self.randomness_power >= 0.0) {
            return Err(GenerationError::invalid(
                "randomness_power",
                self.randomness_power,
                "must be a finite, non-negative value",
            ));
        }
        if !self.spin.is_finite() {
            return Err(GenerationError::invalid("spin", self.spin, "must be finite"));
        }
        Ok(())
    }
}

impl Display for GenerationParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} size={} radius={} branches={} spin={} ",
            self.count,
            self.size,
            self.radius,
            self.branches,
            self.spin,
        )?;
        write!(
            f,
            "randomness={} power={} inside={} outside={}",
            self.randomness,
            self.randomness_power,
            self.inside_color.to_hex(),
            self.outside_color.to_hex(),
        )
    }
}
