//! Offscreen canvas model used by the crop pipeline.
//!
//! [`Canvas`] is a small RGBA surface with the subset of 2D-context
//! semantics the crop needs: transparent on allocation and on resize,
//! `getImageData` reads outside the surface come back transparent, and
//! `putImageData` writes are clipped.
//!
//! [`SafeArea`] is the oversized square surface (side = twice the larger
//! image dimension) the source is drawn onto, rotated about its center.
//! It is never materialized: reads are answered from the rotated layer and
//! its offset, which gives the same pixels without allocating `side²` RGBA.

use crate::decode::DecodedImage;

use super::{rotate_quarter, Rotation};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// A block of RGBA pixels, as returned by `getImageData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// RGBA, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
}

impl ImageData {
    fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// An RGBA drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: ImageData,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: ImageData::transparent(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width
    }

    pub fn height(&self) -> u32 {
        self.pixels.height
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Resize the surface. Like assigning `canvas.width`, this clears it.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.pixels = ImageData::transparent(width, height);
    }

    /// Write raw pixels at `(dx, dy)`, replacing what is there.
    pub fn put_image_data(&mut self, data: &ImageData, dx: i64, dy: i64) {
        for y in 0..data.height {
            for x in 0..data.width {
                if let Some((tx, ty)) = self.target(dx + x as i64, dy + y as i64) {
                    self.pixels.set(tx, ty, data.get(x, y));
                }
            }
        }
    }

    /// Composite onto black and drop alpha, as a JPEG export of the canvas does.
    pub fn flatten(&self) -> DecodedImage {
        let pixels = self
            .pixels
            .data
            .chunks_exact(4)
            .flat_map(|p| {
                let a = p[3] as u16;
                [
                    (p[0] as u16 * a / 255) as u8,
                    (p[1] as u16 * a / 255) as u8,
                    (p[2] as u16 * a / 255) as u8,
                ]
            })
            .collect();
        DecodedImage::new(self.width(), self.height(), pixels)
    }

    fn target(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let in_bounds =
            x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64;
        in_bounds.then_some((x as u32, y as u32))
    }
}

/// The oversized square surface a rotated source is drawn onto.
#[derive(Debug, Clone)]
pub struct SafeArea {
    side: u64,
    layer: DecodedImage,
    origin: (i64, i64),
}

impl SafeArea {
    /// Side length large enough that rotating the image about its center
    /// cannot push a corner off the surface.
    pub fn side_for(width: u32, height: u32) -> u64 {
        width.max(height) as u64 * 2
    }

    /// Draw `image` rotated about the surface center.
    pub fn new(image: &DecodedImage, rotation: Rotation) -> Self {
        let side = Self::side_for(image.width, image.height);
        let layer = rotate_quarter(image, rotation);
        let origin = Self::centered(side, layer.width, layer.height);
        Self {
            side,
            layer,
            origin,
        }
    }

    pub fn side(&self) -> u64 {
        self.side
    }

    /// Top-left corner of the rotated image on the surface.
    pub fn image_origin(&self) -> (i64, i64) {
        self.origin
    }

    /// Dimensions of the rotated image.
    pub fn image_dimensions(&self) -> (u32, u32) {
        self.layer.dimensions()
    }

    /// Copy a region, reading transparent outside the surface or the image.
    pub fn get_image_data(&self, sx: i64, sy: i64, width: u32, height: u32) -> ImageData {
        let mut out = ImageData::transparent(width, height);
        let side = self.side as i64;
        let (ox, oy) = self.origin;

        for y in 0..height {
            let py = sy + y as i64;
            if py < 0 || py >= side || py < oy {
                continue;
            }
            for x in 0..width {
                let px = sx + x as i64;
                if px < 0 || px >= side || px < ox {
                    continue;
                }
                let rgba = match self.layer.pixel((px - ox) as u32, (py - oy) as u32) {
                    Some([r, g, b]) => [r, g, b, 255],
                    None => TRANSPARENT,
                };
                out.set(x, y, rgba);
            }
        }
        out
    }

    fn centered(side: u64, width: u32, height: u32) -> (i64, i64) {
        let half = (side / 2) as i64;
        (half - (width / 2) as i64, half - (height / 2) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        let pixels = (0..width * height).flat_map(|_| rgb).collect();
        DecodedImage::new(width, height, pixels)
    }

    fn block(width: u32, height: u32, rgba: [u8; 4]) -> ImageData {
        ImageData {
            width,
            height,
            data: (0..width * height).flat_map(|_| rgba).collect(),
        }
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(3, 2);
        assert_eq!(canvas.pixels.data.len(), 3 * 2 * 4);
        assert!(canvas.pixels.data.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_put_image_data_at_offset() {
        let mut canvas = Canvas::new(3, 3);
        canvas.put_image_data(&block(1, 1, [10, 20, 30, 255]), 1, 1);

        assert_eq!(canvas.pixels.get(1, 1), [10, 20, 30, 255]);
        assert_eq!(canvas.pixels.get(0, 0), [0, 0, 0, 0]);
        assert_eq!(canvas.pixels.get(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_put_image_data_clips() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_image_data(&block(3, 3, [9, 9, 9, 255]), 1, -1);

        assert_eq!((canvas.width(), canvas.height()), (2, 2));
        assert_eq!(canvas.pixels.get(0, 0), [0, 0, 0, 0]);
        assert_eq!(canvas.pixels.get(1, 0), [9, 9, 9, 255]);
        assert_eq!(canvas.pixels.get(1, 1), [9, 9, 9, 255]);
    }

    #[test]
    fn test_set_size_clears() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_image_data(&block(2, 2, [1, 2, 3, 255]), 0, 0);
        canvas.set_size(5, 1);

        assert_eq!((canvas.width(), canvas.height()), (5, 1));
        assert!(canvas.pixels.data.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_flatten_over_black() {
        let mut canvas = Canvas::new(2, 1);
        canvas.put_image_data(&block(1, 1, [200, 100, 50, 255]), 0, 0);
        let flat = canvas.flatten();
        assert_eq!(flat.pixels, vec![200, 100, 50, 0, 0, 0]);
    }

    #[test]
    fn test_zero_size_canvas_is_empty() {
        assert!(Canvas::new(0, 10).is_empty());
        assert!(!Canvas::new(1, 1).is_empty());
    }

    #[test]
    fn test_safe_area_side() {
        assert_eq!(SafeArea::side_for(100, 40), 200);
        assert_eq!(SafeArea::side_for(30, 70), 140);
    }

    #[test]
    fn test_safe_area_centers_image() {
        let area = SafeArea::new(&solid(100, 40, [9, 9, 9]), Rotation::NONE);
        assert_eq!(area.side(), 200);
        assert_eq!(area.image_origin(), (50, 80));
    }

    #[test]
    fn test_safe_area_centers_rotated_image() {
        let area = SafeArea::new(&solid(100, 40, [9, 9, 9]), Rotation::NONE.next());
        assert_eq!(area.image_dimensions(), (40, 100));
        assert_eq!(area.image_origin(), (80, 50));
    }

    #[test]
    fn test_safe_area_reads_around_image() {
        let area = SafeArea::new(&solid(2, 2, [50, 60, 70]), Rotation::NONE);
        // side 4, image at (1, 1)
        let data = area.get_image_data(0, 0, 4, 4);
        let at = |x: usize, y: usize| &data.data[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];

        assert_eq!(at(0, 0), &[0, 0, 0, 0]);
        assert_eq!(at(1, 1), &[50, 60, 70, 255]);
        assert_eq!(at(2, 2), &[50, 60, 70, 255]);
        assert_eq!(at(3, 3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_safe_area_reads_outside_surface() {
        let area = SafeArea::new(&solid(2, 2, [50, 60, 70]), Rotation::NONE);
        let data = area.get_image_data(-10, 100, 3, 3);
        assert!(data.data.iter().all(|&c| c == 0));
    }
}
