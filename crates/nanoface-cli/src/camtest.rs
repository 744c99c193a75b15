//! Jetson camera smoke test.
//!
//! Opens the CSI camera through the GStreamer pipeline and displays raw
//! frames, nothing else. Use it to confirm the sensor and pipeline work
//! before running the recognition demo. `Q` quits.

use anyhow::{Context, Result};
use macroquad::prelude::*;
use nanoface_hw::gst::GstCamera;
use nanoface_hw::{FrameSource, JetsonPipeline};
use tracing_subscriber::EnvFilter;

mod display;

fn window_conf() -> Conf {
    Conf {
        window_title: "JetsonCam".to_owned(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "camtest failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let pipeline = JetsonPipeline::default();
    let mut camera = GstCamera::open(&pipeline)?;

    let mut texture: Option<Texture2D> = None;

    loop {
        let frame = camera.next_frame()?;
        let image = frame
            .into_image()
            .context("frame buffer does not match its dimensions")?;

        display::blit(&mut texture, &image);

        if is_key_pressed(KeyCode::Q) {
            break;
        }
        next_frame().await;
    }

    Ok(())
}
