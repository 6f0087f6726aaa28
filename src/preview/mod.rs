//! Minimal point-cloud consumer used to eyeball generated fields.
//!
//! Points are splatted additively through a perspective camera into a color buffer that
//! can be saved as a PNG or printed to a truecolor terminal.

mod buffer;
mod camera;
mod splat;

pub use buffer::FrameBuffer;
pub use camera::{PreviewCamera, ProjectedPoint};
pub use splat::splat_field;

use crate::core::ParticleField;

/// Terminal cells are roughly twice as tall as they are wide.
pub const TERMINAL_CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub width: usize,
    pub height: usize,
    /// Height / width of a single output pixel.
    pub pixel_aspect: f32,
    /// Brightness multiplier applied to every splat.
    pub intensity: f32,
    pub camera: PreviewCamera,
}

impl PreviewOptions {
    pub fn image(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixel_aspect: 1.0,
            intensity: 0.6,
            camera: PreviewCamera::default(),
        }
    }

    pub fn terminal(columns: usize, rows: usize) -> Self {
        Self {
            width: columns,
            height: rows,
            pixel_aspect: TERMINAL_CELL_ASPECT,
            intensity: 0.25,
            camera: PreviewCamera::default(),
        }
    }
}

/// Frames the camera on a disc of `radius` and renders `field` into a new buffer.
pub fn render_preview(
    field: &ParticleField,
    radius: f32,
    point_size: f32,
    options: &PreviewOptions,
) -> FrameBuffer {
    let mut camera = options.camera.clone();
    camera.update_aspect_ratio(
        options.width as f32,
        options.height as f32 * options.pixel_aspect,
    );
    camera.frame_radius(radius);

    let mut buffer = FrameBuffer::new(options.width, options.height);
    splat_field(field, &camera, point_size, options.intensity, &mut buffer);
    buffer
}
