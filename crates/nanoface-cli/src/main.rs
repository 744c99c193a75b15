//! Camera face-recognition demo.
//!
//! Captures frames from the selected camera source, detects faces with the
//! cascade model, extracts embeddings, matches them against the gallery by
//! vote counting, and overlays recognized names on a live window. `Q` quits.

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::imageops::{self, FilterType};
use image::RgbImage;
use macroquad::prelude::*;
use nanoface_core::detector::FaceDetector;
use nanoface_core::recognizer::{FaceRecognizer, EMBEDDING_DIM};
use nanoface_core::{Gallery, VoteMatcher, UNKNOWN_LABEL};
use nanoface_hw::source::CameraSource;
use nanoface_hw::{open_source, select_source, JetsonPipeline};
use tracing_subscriber::EnvFilter;

mod display;
mod overlay;

#[derive(Parser)]
#[command(name = "nanoface", about = "Camera face recognition demo")]
struct Cli {
    /// Path to the face cascade detector model
    #[arg(short, long)]
    cascade: String,

    /// Path to the serialized db of facial encodings
    #[arg(short, long)]
    encodings: String,

    /// Path to the ONNX face recognition model
    #[arg(short, long, default_value = "models/w600k_r50.onnx")]
    recognizer: String,

    /// Euclidean distance tolerance for a positive match
    #[arg(long, default_value_t = nanoface_core::DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Width frames are resized to before detection
    #[arg(long, default_value_t = 500)]
    resize_width: u32,

    /// V4L2 device index, used when not running on a Jetson
    #[arg(long, default_value_t = 0)]
    device: u32,
}

/// Everything the frame loop needs, built once at startup and passed in
/// explicitly.
struct App {
    detector: FaceDetector,
    recognizer: FaceRecognizer,
    gallery: Gallery,
    matcher: VoteMatcher,
    resize_width: u32,
}

impl App {
    fn from_cli(cli: &Cli) -> Result<Self> {
        tracing::info!("loading encodings + face detector");
        let gallery = Gallery::load(&cli.encodings)?;
        if let Some(dim) = gallery.dimension() {
            if dim != EMBEDDING_DIM {
                bail!(
                    "gallery encodings are {dim}-dimensional, but the recognition \
                     model produces {EMBEDDING_DIM}-dimensional embeddings"
                );
            }
        }
        let detector = FaceDetector::load(&cli.cascade)?;
        let recognizer = FaceRecognizer::load(&cli.recognizer)?;
        Ok(Self {
            detector,
            recognizer,
            gallery,
            matcher: VoteMatcher::new(cli.tolerance),
            resize_width: cli.resize_width,
        })
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "nanoface".to_owned(),
        window_width: 1000,
        window_height: 750,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "nanoface failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut app = App::from_cli(&cli)?;

    let source = select_source(cli.device, JetsonPipeline::default());
    let mut camera = open_source(&source)?;
    if matches!(source, CameraSource::Jetson(_)) {
        // Let the CSI sensor warm up before the first read.
        tracing::info!("starting video stream");
        std::thread::sleep(std::time::Duration::from_secs(2));
    }

    let mut texture: Option<Texture2D> = None;

    loop {
        let frame = camera.next_frame()?;
        let image = frame
            .into_image()
            .context("frame buffer does not match its dimensions")?;

        // Shrink before detection; the cascade cost scales with area.
        let resized = resize_to_width(&image, app.resize_width);
        let gray = imageops::grayscale(&resized);

        let faces = app.detector.detect(&gray);
        let mut names = Vec::with_capacity(faces.len());
        for face in &faces {
            let name = match app.recognizer.extract(&gray, face) {
                Ok(embedding) => app.matcher.label(&embedding, &app.gallery).to_owned(),
                Err(err) => {
                    tracing::warn!(error = %err, "embedding extraction failed");
                    UNKNOWN_LABEL.to_owned()
                }
            };
            if name != UNKNOWN_LABEL {
                tracing::info!(name = %name, "recognized");
            }
            names.push(name);
        }

        let annotations = overlay::pair_labels(faces, names);
        overlay::present(&mut texture, &resized, &annotations);

        if is_key_pressed(KeyCode::Q) {
            break;
        }
        next_frame().await;
    }

    // Dropping the camera releases the device (or tears down the
    // GStreamer child); the window closes when main returns.
    drop(camera);
    tracing::info!("stopped");
    Ok(())
}

/// Resize to a fixed width, preserving aspect ratio.
fn resize_to_width(image: &RgbImage, width: u32) -> RgbImage {
    if image.width() == width {
        return image.clone();
    }
    let height = ((image.height() as f32 * width as f32 / image.width() as f32).round() as u32).max(1);
    imageops::resize(image, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_to_width_preserves_aspect() {
        let image = RgbImage::new(1000, 500);
        let resized = resize_to_width(&image, 500);
        assert_eq!(resized.dimensions(), (500, 250));
    }

    #[test]
    fn test_resize_to_width_noop_at_target() {
        let image = RgbImage::new(500, 300);
        let resized = resize_to_width(&image, 500);
        assert_eq!(resized.dimensions(), (500, 300));
    }

    #[test]
    fn test_resize_to_width_never_zero_height() {
        let image = RgbImage::new(4000, 1);
        let resized = resize_to_width(&image, 500);
        assert_eq!(resized.width(), 500);
        assert!(resized.height() >= 1);
    }
}
