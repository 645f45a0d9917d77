//! CPU pixel buffer that legends are rendered into, and PNG export.

use std::path::Path;

use cortexvis_core::{rgb_to_bytes, CortexvisError, Result};
use glam::Vec3;
use image::{ImageBuffer, Rgba};

/// A `width x height` RGB buffer with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl PixelBuffer {
    /// Creates a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Color at `(x, y)`, `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Vec3> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Fills rows `[start, end)`, clipped to the buffer.
    pub fn fill_rows(&mut self, start: u32, end: u32, color: Vec3) {
        let end = end.min(self.height);
        if start >= end {
            return;
        }
        let (a, b) = (self.index(0, start), self.index(0, end));
        self.pixels[a..b].fill(color);
    }

    pub fn fill_row(&mut self, y: u32, color: Vec3) {
        self.fill_rows(y, y.saturating_add(1), color);
    }

    pub fn fill_column(&mut self, x: u32, color: Vec3) {
        for y in 0..self.height {
            self.set(x, y, color);
        }
    }

    pub fn fill(&mut self, color: Vec3) {
        self.pixels.fill(color);
    }

    /// Row-major RGBA8 bytes, fully opaque.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&c| {
                let [r, g, b] = rgb_to_bytes(c);
                [r, g, b, 255]
            })
            .collect()
    }

    fn to_image(&self) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
        ImageBuffer::from_raw(self.width, self.height, self.to_rgba8())
            .ok_or_else(|| CortexvisError::Image("invalid image data".to_string()))
    }

    /// Writes the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| CortexvisError::Image(e.to_string()))
    }

    /// Encodes the buffer as PNG in memory.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        self.to_image()?
            .write_to(&mut buffer, image::ImageFormat::Png)
            .map_err(|e| CortexvisError::Image(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_clips() {
        let mut buf = PixelBuffer::new(2, 4);
        buf.fill_rows(3, 10, Vec3::ONE);
        assert_eq!(buf.get(1, 3), Some(Vec3::ONE));
        assert_eq!(buf.get(0, 2), Some(Vec3::ZERO));
        assert_eq!(buf.get(0, 4), None);
        buf.fill_rows(2, 1, Vec3::X);
        assert_eq!(buf.get(0, 2), Some(Vec3::ZERO));
    }

    #[test]
    fn test_to_rgba8() {
        let mut buf = PixelBuffer::new(1, 2);
        buf.fill_row(0, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(buf.to_rgba8(), vec![255, 128, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_encode_png_signature() {
        let buf = PixelBuffer::new(3, 3);
        let png = buf.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
