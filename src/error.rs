// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the composite to the window failed

    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed

    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed

    #[error("Background error ({}): {source}", path.display())]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Frame, background and mask must all share one resolution.
    #[error("Dimension mismatch in {what}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}
