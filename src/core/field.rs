use glam::Vec3;

use super::Color;

/// Flat, index-aligned position and color buffers for a point cloud.
///
/// Particle `i` lives at `[3i, 3i + 3)` in both buffers. Colors are linear RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleField {
    /// Zeroed buffers for `count` particles.
    pub(crate) fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
        }
    }

    pub(crate) fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.positions, &mut self.colors)
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn color(&self, index: usize) -> Color {
        let c = &self.colors[index * 3..index * 3 + 3];
        Color::new(c[0], c[1], c[2])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Color)> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| (Vec3::from_slice(p), Color::new(c[0], c[1], c[2])))
    }

    /// Axis-aligned bounds of every position, `None` for an empty field.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.positions.chunks_exact(3).map(Vec3::from_slice);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Hands both buffers to a consumer, `(positions, colors)`.
    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.colors)
    }
}
