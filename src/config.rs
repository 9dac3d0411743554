// Every knob of the effect lives here, with the values the cloak ships with.
use std::path::PathBuf;
use std::time::Duration;

use image::Rgb;

use crate::hsv::HsvLut;
use crate::types::HsvRange;

#[derive(Clone, Debug)]
pub struct CloakConfig {
    pub camera_index: u32,       // 0 = default webcam
    pub width: u32,              // requested resolution; the camera may pick a close one
    pub height: u32,
    pub fps: u32,                // requested frame rate
    pub background_path: PathBuf,
    pub window_title: String,
    pub range: HsvRange,         // which colors become invisible
    pub key_poll: Duration,      // how long each iteration waits for keyboard input
}

impl Default for CloakConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: 640,
            height: 480,
            fps: 30,
            background_path: PathBuf::from("./background.jpg"),
            window_title: "cloak".to_string(),
            // hue of pure red ± 10 -> (0,100,100)..(10,255,255)
            range: HsvRange::around(HsvLut::new().hsv(Rgb([255, 0, 0])), 10),
            key_poll: Duration::from_millis(5),
        }
    }
}
