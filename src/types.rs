// Core types shared by the camera, the compositor and the window.

use image::{GrayImage, RgbImage};

/// Live frames, the background and the composite are plain RGB images.
pub type Frame = RgbImage;

/// Binary mask, one byte per pixel: `MASK_ON` = cloak (show background),
/// `MASK_OFF` = keep the live pixel.
pub type Mask = GrayImage;

pub const MASK_ON: u8 = 255;
pub const MASK_OFF: u8 = 0;

/// Window-side pixel buffer, reused every frame.
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pack an RGB image into 0x00RRGGBB pixels, resizing the buffer if needed.
    pub fn fill_from(&mut self, img: &RgbImage) {
        let (w, h) = img.dimensions();
        self.width = w as usize;
        self.height = h as usize;
        self.pixels.clear();
        self.pixels
            .extend(img.pixels().map(|p| pack_rgb(p[0], p[1], p[2])));
    }
}

/// Pack one RGB triplet as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// 8-bit HSV triple: hue in [0, 180) (degrees / 2), saturation and value in [0, 255].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Largest hue value in the 8-bit scale.
pub const HUE_MAX: u8 = 179;

/// Inclusive componentwise HSV range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

/// (0,100,100)..(10,255,255): the range the cloak uses by default.
#[cfg(test)]
pub const RED_LOW_BAND: HsvRange = HsvRange {
    lower: Hsv::new(0, 100, 100),
    upper: Hsv::new(10, 255, 255),
};

impl HsvRange {
    /// Range of `center.h ± hue_spread` with saturation/value in 100..=255.
    /// Hue saturates at the ends of the scale instead of wrapping.
    pub fn around(center: Hsv, hue_spread: u8) -> Self {
        HsvRange {
            lower: Hsv::new(center.h.saturating_sub(hue_spread), 100, 100),
            upper: Hsv::new(center.h.saturating_add(hue_spread).min(HUE_MAX), 255, 255),
        }
    }

    #[inline]
    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&px.h)
            && (self.lower.s..=self.upper.s).contains(&px.s)
            && (self.lower.v..=self.upper.v).contains(&px.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x0012_3456);
    }

    #[test]
    fn test_fill_from_row_major() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));

        let mut fb = FrameBuffer::new(1, 1);
        fb.fill_from(&img);
        assert_eq!((fb.width, fb.height), (2, 2));
        assert_eq!(fb.pixels, vec![0, 0x00FF_0000, 0x0000_00FF, 0]);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let r = RED_LOW_BAND;
        assert!(r.contains(Hsv::new(0, 100, 100)));
        assert!(r.contains(Hsv::new(10, 255, 255)));
        assert!(!r.contains(Hsv::new(11, 200, 200)));
        assert!(!r.contains(Hsv::new(5, 99, 200)));
        assert!(!r.contains(Hsv::new(5, 200, 99)));
        assert!(!r.contains(Hsv::new(175, 255, 255)));
    }

    #[test]
    fn test_range_around_saturates() {
        assert_eq!(HsvRange::around(Hsv::new(0, 255, 255), 10), RED_LOW_BAND);

        let green = HsvRange::around(Hsv::new(60, 255, 255), 10);
        assert_eq!(green.lower, Hsv::new(50, 100, 100));
        assert_eq!(green.upper, Hsv::new(70, 255, 255));

        let top = HsvRange::around(Hsv::new(175, 255, 255), 10);
        assert_eq!(top.upper.h, HUE_MAX);
    }
}
