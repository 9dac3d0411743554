// The compositor: one live frame in, one cloaked frame out, until told to stop.
// What you SEE: your camera feed, except red things show the stored background.

use std::time::{Duration, Instant};

use image::DynamicImage;

use crate::camera::{FrameSource, Grab};
use crate::draw::Display;
use crate::error::Error;
use crate::hsv::HsvLut;
use crate::types::{Frame, HsvRange};
use crate::vision;

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    QuitKey,
    WindowClosed,
    SourceClosed,
}

/// Outcome of one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Shown,   // a frame was composited and presented
    Skipped, // the source had nothing this time
    Stop(Termination),
}

/// Frames-per-second counter, reported once per second.
struct FpsCounter {
    since: Instant,
    frames: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self { since: Instant::now(), frames: 0 }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Duration::from_secs(1) {
            log::debug!("FPS: {:.1}", self.frames as f32 / elapsed.as_secs_f32());
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

pub struct Cloak<S: FrameSource, D: Display> {
    source: S,
    display: D,
    background: Frame,
    range: HsvRange,
    lut: HsvLut,
    show_mask: bool, // debug view: present the mask instead of the composite
    fps: FpsCounter,
}

impl<S: FrameSource, D: Display> Cloak<S, D> {
    pub fn new(source: S, display: D, background: Frame, range: HsvRange) -> Self {
        Self {
            source,
            display,
            background,
            range,
            lut: HsvLut::new(),
            show_mask: false,
            fps: FpsCounter::new(),
        }
    }

    /// Run one iteration: grab, mask, composite, present, poll keys.
    pub fn step(&mut self) -> Result<Step, Error> {
        if !self.display.is_open() {
            return Ok(Step::Stop(Termination::WindowClosed));
        }

        // 1) Fresh live frame (or nothing this time).
        let frame = match self.source.grab() {
            Grab::Frame(frame) => frame,
            Grab::NotReady => return Ok(Step::Skipped),
            Grab::Closed => return Ok(Step::Stop(Termination::SourceClosed)),
        };

        if frame.dimensions() != self.background.dimensions() {
            return Err(Error::DimensionMismatch {
                what: "camera frame vs background",
                expected: self.background.dimensions(),
                actual: frame.dimensions(),
            });
        }

        // 2) Red pixels -> mask; 3) background under the mask, live frame elsewhere.
        let mask = vision::cloak_mask(&frame, &self.lut, &self.range);
        log::trace!("{} px cloaked", vision::count_on(&mask));
        if self.show_mask {
            // white = cloaked
            self.display.present(&DynamicImage::ImageLuma8(mask).to_rgb8())?;
        } else {
            let out = vision::composite(&frame, &self.background, &mask)?;
            self.display.present(&out)?;
        }
        self.fps.tick();

        // 4) Key state is fresh right after present.
        if self.display.quit_pressed() {
            return Ok(Step::Stop(Termination::QuitKey));
        }
        if self.display.mask_toggle_pressed() {
            self.show_mask = !self.show_mask;
            log::info!("mask preview {}", if self.show_mask { "on" } else { "off" });
        }
        Ok(Step::Shown)
    }

    /// Loop until a stop condition. Consuming `self` releases the camera and
    /// closes the window on every exit path, errors included.
    pub fn run(mut self) -> Result<Termination, Error> {
        loop {
            if let Step::Stop(reason) = self.step()? {
                log::info!("stopping: {reason:?}");
                return Ok(reason);
            }
        }
    }
}
