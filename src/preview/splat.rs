use log::trace;

use super::{FrameBuffer, PreviewCamera};
use crate::core::ParticleField;

/// Draws every particle of `field` into `buffer` as an additive square.
///
/// `point_size` is in world units and shrinks with distance; a point never covers less
/// than one pixel. Returns the number of particles that landed on screen.
pub fn splat_field(
    field: &ParticleField,
    camera: &PreviewCamera,
    point_size: f32,
    intensity: f32,
    buffer: &mut FrameBuffer,
) -> usize {
    let view_proj = camera.get_projection_matrix() * camera.get_view_matrix();
    let focal = camera.focal_length(buffer.height);
    let (width, height) = (buffer.width, buffer.height);
    let mut drawn = 0;

    for (position, color) in field.iter() {
        let Some(projected) = camera.project_point(&view_proj, position, width, height) else {
            continue;
        };
        let size_px = (point_size * focal / projected.depth).max(1.0);
        let half = (size_px / 2.0).floor() as i64;
        let cx = projected.position.x.floor() as i64;
        let cy = projected.position.y.floor() as i64;
        let color = color.scale(intensity);

        // clip the footprint to the buffer so huge points cost at most one full frame
        let x0 = cx.saturating_sub(half).max(0);
        let y0 = cy.saturating_sub(half).max(0);
        let x1 = cx.saturating_add(half).min(width as i64 - 1);
        let y1 = cy.saturating_add(half).min(height as i64 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                buffer.accumulate(x, y, color);
            }
        }
        drawn += 1;
    }

    trace!("splatted {} of {} particles", drawn, field.len());
    drawn
}
