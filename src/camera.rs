// Opens the default camera and decodes its frames to RGB.
// Visual expectation: each `grab()` yields one live RGB frame, ready to be
// composited and pushed to the screen.

use crate::error::Error;
use crate::types::Frame;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Result of asking a source for one frame.
#[derive(Debug)]
pub enum Grab {
    Frame(Frame),
    NotReady, // nothing this time; ask again next iteration
    Closed,   // the stream is gone; stop the loop
}

/// Anything that hands out live frames one at a time.
pub trait FrameSource {
    fn grab(&mut self) -> Grab;
}

// A small wrapper around nokhwa::Camera so the compositor stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Try to open camera `index` at a target resolution (falls back if not exact).
    /// On success, nothing is shown on screen yet; we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        // 1) Choose the device (0 = default webcam)
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );

        // 2) Ask for RGB frames in the format closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 3) Create the camera (this might fail if no device exists).
        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        // 4) Start streaming frames from the camera.
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // 5) The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!(
            "camera {index} streaming at {}x{} (requested {width}x{height} @ {fps} fps)",
            actual.width(),
            actual.height()
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame from the camera and decode it to RGB.
    pub fn next_frame(&mut self) -> Result<Frame, Error> {
        // Blocks until a new frame is ready.
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // Decode to an ImageBuffer<Rgb<u8>, Vec<u8>> (handles various raw formats safely).
        frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    fn grab(&mut self) -> Grab {
        if !self.cam.is_stream_open() {
            return Grab::Closed;
        }
        match self.next_frame() {
            Ok(frame) => Grab::Frame(frame),
            Err(err) => {
                // Camera hiccup: skip this iteration and poll again.
                log::debug!("{err}");
                Grab::NotReady
            }
        }
    }
}

impl Drop for CameraCapture {
    // Release the device exactly once, whichever way the loop ended.
    fn drop(&mut self) {
        if let Err(err) = self.cam.stop_stream() {
            log::warn!("failed to stop camera stream: {err}");
        } else {
            log::info!("camera released");
        }
    }
}
