// Pixel operations behind the cloak effect.
// Visual expectation: wherever the camera sees something red, the composite
// shows the stored background instead, so the red object "disappears".
use image::{imageops, GrayImage, Luma, Pixel, Rgb, RgbImage};

use crate::error::Error;
use crate::hsv::HsvLut;
use crate::types::{Frame, Hsv, HsvRange, Mask, MASK_OFF, MASK_ON};

/// Convert a whole frame to HSV; channels 0/1/2 of the result hold H/S/V.
pub fn to_hsv(frame: &Frame, lut: &HsvLut) -> RgbImage {
    let mut out = frame.clone();
    for px in out.pixels_mut() {
        let hsv = lut.hsv(*px);
        *px = Rgb([hsv.h, hsv.s, hsv.v]);
    }
    out
}

/// Threshold an HSV image: `MASK_ON` where the pixel lies inside `range`.
pub fn in_range(hsv: &RgbImage, range: &HsvRange) -> Mask {
    let (w, h) = hsv.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let [hue, sat, val] = hsv.get_pixel(x, y).0;
        if range.contains(Hsv::new(hue, sat, val)) { Luma([MASK_ON]) } else { Luma([MASK_OFF]) }
    })
}

/// Flip every mask bit (on <-> off).
pub fn invert_mask(mask: &Mask) -> Mask {
    let mut inv = mask.clone();
    imageops::invert(&mut inv);
    inv
}

pub fn count_on(mask: &Mask) -> usize {
    mask.pixels().filter(|p| p[0] == MASK_ON).count()
}

/// Keep `src` pixels where the mask is on, black elsewhere.
pub fn masked(src: &Frame, mask: &Mask) -> Result<Frame, Error> {
    if src.dimensions() != mask.dimensions() {
        return Err(Error::DimensionMismatch {
            what: "masked",
            expected: src.dimensions(),
            actual: mask.dimensions(),
        });
    }
    let mut out = src.clone();
    for (px, m) in out.pixels_mut().zip(mask.pixels()) {
        if m[0] != MASK_ON {
            *px = Rgb([0, 0, 0]);
        }
    }
    Ok(out)
}

/// Per-channel saturating sum of two frames.
pub fn add_saturating(a: &Frame, b: &Frame) -> Result<Frame, Error> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::DimensionMismatch {
            what: "add",
            expected: a.dimensions(),
            actual: b.dimensions(),
        });
    }
    let mut out = a.clone();
    for (pa, pb) in out.pixels_mut().zip(b.pixels()) {
        pa.apply2(pb, |x, y| x.saturating_add(y));
    }
    Ok(out)
}

/// Build the cloak mask for a live frame.
pub fn cloak_mask(frame: &Frame, lut: &HsvLut, range: &HsvRange) -> Mask {
    in_range(&to_hsv(frame, lut), range)
}

/// Background where the mask is on, live frame elsewhere.
/// The two parts never overlap, so the sum is a pure per-pixel selection.
pub fn composite(frame: &Frame, background: &Frame, mask: &Mask) -> Result<Frame, Error> {
    if frame.dimensions() != background.dimensions() {
        return Err(Error::DimensionMismatch {
            what: "composite",
            expected: background.dimensions(),
            actual: frame.dimensions(),
        });
    }
    let part1 = masked(background, mask)?;
    let inverse = invert_mask(mask);
    let part2 = masked(frame, &inverse)?;
    add_saturating(&part1, &part2)
}
