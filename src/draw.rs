// Window + keyboard.
// Visual effects provided here:
// 1) A window that shows the composited (cloaked) camera image.
// 2) Key polling: Q quits, M toggles the mask preview.

use std::time::Duration;

use crate::error::Error;
use crate::types::{Frame, FrameBuffer};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

/// Where composited frames go and where the user's key presses come from.
pub trait Display {
    /// Push one frame; this is also when key state refreshes.
    fn present(&mut self, frame: &Frame) -> Result<(), Error>;
    /// False once the user closed the window.
    fn is_open(&self) -> bool;
    fn quit_pressed(&self) -> bool;
    fn mask_toggle_pressed(&self) -> bool;
}

pub struct Drawer {
    window: Window,      // the on-screen window you see
    screen: FrameBuffer, // reused 0x00RRGGBB buffer handed to minifb
}

/// Frame-rate cap that makes each present wait at most `key_poll`.
/// Never 0: minifb treats 0 as "no cap".
fn target_fps(key_poll: Duration) -> usize {
    let millis = key_poll.as_millis().max(1) as usize;
    (1000 / millis).max(1)
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// `key_poll` caps how long each present waits, which is the per-frame key poll window.
    pub fn new(title: &str, width: usize, height: usize, key_poll: Duration) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps(key_poll));

        Ok(Self { window, screen: FrameBuffer::new(width, height) })
    }
}

impl Display for Drawer {
    /// Visual: the window immediately displays the new image.
    fn present(&mut self, frame: &Frame) -> Result<(), Error> {
        self.screen.fill_from(frame);
        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn quit_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Q, KeyRepeat::No)
    }

    // we flip a boolean in the compositor to switch the displayed buffer.
    fn mask_toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::M, KeyRepeat::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_fps() {
        assert_eq!(target_fps(Duration::from_millis(5)), 200);
        assert_eq!(target_fps(Duration::ZERO), 1000);
        assert_eq!(target_fps(Duration::from_millis(1500)), 1);
        assert_eq!(target_fps(Duration::from_secs(60)), 1);
    }
}
