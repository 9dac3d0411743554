// What you SEE:
// • A window with your live camera feed.
// • Anything red is replaced by ./background.jpg, so it looks invisible.
// • M toggles the raw mask (white = cloaked), Q quits.
//
// Capture background.jpg first with the camera pointed at the empty scene.

mod background;
mod camera;
mod cloak;
mod config;
mod draw;
mod error;
mod hsv;
mod types;
mod vision;

use background::load_background;
use camera::CameraCapture;
use cloak::Cloak;
use config::CloakConfig;
use draw::Drawer;
use error::Error;

fn main() -> Result<(), Error> {
    env_logger::init();

    let cfg = CloakConfig::default();

    /* --- Camera + window setup ---
       Visual: window opens sized to whatever resolution the camera settled on. */
    let cam = CameraCapture::new(cfg.camera_index, cfg.width, cfg.height, cfg.fps)?;
    let (w, h) = cam.resolution();

    /* --- Background ---
       Loaded once; a missing or unreadable file ends the program here. */
    let background = load_background(&cfg.background_path, w, h)?;

    let drawer = Drawer::new(&cfg.window_title, w as usize, h as usize, cfg.key_poll)?;

    let reason = Cloak::new(cam, drawer, background, cfg.range).run()?;
    log::info!("cloak finished ({reason:?})");
    Ok(())
}
