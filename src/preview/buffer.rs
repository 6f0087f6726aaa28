use std::io::Write;
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::core::Color;
use crate::error::PreviewError;

/// Color target that accumulates points additively, there is no depth test.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![Color::BLACK; width * height],
        }
    }

    /// Adds `color` to the pixel, out of range coordinates are ignored.
    pub fn accumulate(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.data[x + y * self.width] += color;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.data[x + y * self.width]
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self.pixel(x as usize, y as usize).to_rgb8())
        })
    }

    pub fn save_png(&self, path: &Path) -> Result<(), PreviewError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Writes the buffer as rows of colored blocks using truecolor escapes.
    pub fn present<W: Write>(&self, out: &mut W) -> Result<(), PreviewError> {
        let mut output = String::new();
        let mut last_color: Option<[u8; 3]> = None;

        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.pixel(x, y).clamped();
                let rgb = color.to_rgb8();
                // Only emit an escape when the color changes
                if last_color != Some(rgb) {
                    output.push_str(&color.to_ansi_escape());
                    last_color = Some(rgb);
                }
                output.push('█');
            }
            output.push_str("\r\n");
        }
        output.push_str("\x1b[0m");

        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_adds_and_ignores_out_of_range() {
        let mut buf = FrameBuffer::new(4, 3);
        buf.accumulate(1, 1, Color::new(0.25, 0.0, 0.0));
        buf.accumulate(1, 1, Color::new(0.25, 0.5, 0.0));
        buf.accumulate(-1, 0, Color::WHITE);
        buf.accumulate(4, 0, Color::WHITE);
        buf.accumulate(0, 3, Color::WHITE);
        assert_eq!(buf.pixel(1, 1), Color::new(0.5, 0.5, 0.0));
        assert_eq!(buf.data.iter().filter(|c| **c != Color::BLACK).count(), 1);
    }

    #[test]
    fn image_clamps_saturated_pixels() {
        let mut buf = FrameBuffer::new(2, 1);
        buf.accumulate(0, 0, Color::new(3.0, 0.5, 0.0));
        let img = buf.to_image();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 128, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn present_writes_one_row_per_line() {
        let mut buf = FrameBuffer::new(3, 2);
        buf.accumulate(0, 0, Color::RED);
        let mut out = Vec::new();
        buf.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 2);
        assert_eq!(text.matches('█').count(), 6);
        assert!(text.contains("\x1b[38;2;255;0;0m"));
    }
}
