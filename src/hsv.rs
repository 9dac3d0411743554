// RGB -> 8-bit HSV through precomputed division tables.
// Visual: decides which camera pixels count as "red" and get cloaked.
//
// Fixed-point with 12 fractional bits: hue = 30 * sector_offset / diff and
// saturation = 255 * diff / max, each as a table multiply plus a rounding shift.

use image::Rgb;

use crate::types::Hsv;

const SHIFT: i32 = 12;
const HALF: i32 = 1 << (SHIFT - 1);
const HUE_RANGE: i32 = 180; // 8-bit hue is degrees / 2

pub struct HsvLut {
    // 255 / max(r,g,b) in fixed point; 0 for black
    sat_div: [i32; 256],
    // 180 / (6 * (max - min)) in fixed point; 0 for grays
    hue_div: [i32; 256],
}

impl HsvLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut sat_div = [0i32; 256];
        let mut hue_div = [0i32; 256];
        for i in 1..256 {
            sat_div[i] = ((255 << SHIFT) as f64 / i as f64).round_ties_even() as i32;
            hue_div[i] = ((HUE_RANGE << SHIFT) as f64 / (6.0 * i as f64)).round_ties_even() as i32;
        }
        Self { sat_div, hue_div }
    }

    /// Convert one RGB pixel. Hue lands in 0..180, saturation/value in 0..=255.
    pub fn hsv(&self, px: Rgb<u8>) -> Hsv {
        let [r, g, b] = px.0.map(i32::from);
        let v = r.max(g).max(b);
        let diff = v - r.min(g).min(b);

        let s = (diff * self.sat_div[v as usize] + HALF) >> SHIFT;

        // Offset inside the 60-degree sector, with the sector start folded in.
        let raw = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let mut h = (raw * self.hue_div[diff as usize] + HALF) >> SHIFT;
        if h < 0 {
            h += HUE_RANGE;
        }

        Hsv::new(h as u8, s as u8, v as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(r: u8, g: u8, b: u8) -> Hsv {
        HsvLut::new().hsv(Rgb([r, g, b]))
    }

    #[test]
    fn test_primaries() {
        assert_eq!(hsv(255, 0, 0), Hsv::new(0, 255, 255));
        assert_eq!(hsv(0, 255, 0), Hsv::new(60, 255, 255));
        assert_eq!(hsv(0, 0, 255), Hsv::new(120, 255, 255));
    }

    #[test]
    fn test_grays_and_black() {
        assert_eq!(hsv(0, 0, 0), Hsv::new(0, 0, 0));
        assert_eq!(hsv(128, 128, 128), Hsv::new(0, 0, 128));
        assert_eq!(hsv(255, 255, 255), Hsv::new(0, 0, 255));
    }

    #[test]
    fn test_same_input_same_output() {
        let lut = HsvLut::new();
        let a = lut.hsv(Rgb([12, 200, 77]));
        let b = lut.hsv(Rgb([12, 200, 77]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hue_rounding_near_red_edges() {
        // barely-magenta red stays at the top of the scale instead of folding to 0
        assert_eq!(hsv(181, 1, 4).h, 179);
        assert_eq!(hsv(255, 0, 30).h, 176);
        // fixed-point rounding at the hue 10/11 edge
        assert_eq!(hsv(200, 70, 0).h, 10);
        assert_eq!(hsv(243, 85, 0).h, 11);
        assert_eq!(hsv(255, 85, 0).h, 10);
        assert_eq!(hsv(255, 90, 0).h, 11);
    }

    #[test]
    fn test_saturation_and_value() {
        assert_eq!(hsv(255, 155, 155).s, 100);
        assert_eq!(hsv(255, 156, 156).s, 99);
        assert_eq!(hsv(200, 20, 10), Hsv::new(2, 242, 200));
    }
}
