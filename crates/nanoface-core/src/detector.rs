//! Cascade face detector backed by the `rustface` funnel cascade.
//!
//! The detector model is loaded from the file given on the command line;
//! the sliding-window search itself is owned by the library. This module
//! only adapts its (x, y, w, h) output to frame-clamped
//! (top, right, bottom, left) boxes.

use crate::types::FaceBox;
use image::GrayImage;
use rustface::ImageData;
use std::path::Path;
use thiserror::Error;

// Tuning mirrors the original demo: ignore faces smaller than 30 px.
const MIN_FACE_SIZE: u32 = 30;
const SCORE_THRESHOLD: f64 = 2.0;
const PYRAMID_SCALE_FACTOR: f32 = 0.8;
const SLIDE_WINDOW_STEP: u32 = 4;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("cascade model file not found: {0}")]
    ModelNotFound(String),
    #[error("failed to load cascade model: {0}")]
    Model(String),
}

/// Funnel-cascade face detector.
pub struct FaceDetector {
    inner: Box<dyn rustface::Detector>,
}

impl std::fmt::Debug for FaceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceDetector").finish_non_exhaustive()
    }
}

impl FaceDetector {
    /// Load the cascade model from the given path.
    pub fn load(model_path: &str) -> Result<Self, DetectorError> {
        if !Path::new(model_path).exists() {
            return Err(DetectorError::ModelNotFound(model_path.to_string()));
        }

        let mut inner = rustface::create_detector(model_path)
            .map_err(|e| DetectorError::Model(e.to_string()))?;
        inner.set_min_face_size(MIN_FACE_SIZE);
        inner.set_score_thresh(SCORE_THRESHOLD);
        inner.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        inner.set_slide_window_step(SLIDE_WINDOW_STEP, SLIDE_WINDOW_STEP);

        tracing::info!(path = model_path, "loaded cascade detector");
        Ok(Self { inner })
    }

    /// Detect faces in a grayscale frame.
    pub fn detect(&mut self, gray: &GrayImage) -> Vec<FaceBox> {
        let (width, height) = gray.dimensions();
        let mut image = ImageData::new(gray.as_raw(), width, height);

        let faces = self.inner.detect(&mut image);
        tracing::debug!(faces = faces.len(), "cascade pass complete");

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox::from_rect(
                    bbox.x(),
                    bbox.y(),
                    bbox.width(),
                    bbox.height(),
                    width,
                    height,
                    face.score() as f32,
                )
            })
            .filter(|b| !b.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model() {
        let err = FaceDetector::load("/nonexistent/cascade.bin").unwrap_err();
        assert!(matches!(err, DetectorError::ModelNotFound(_)));
    }
}
