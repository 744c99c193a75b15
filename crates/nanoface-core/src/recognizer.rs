//! ONNX face recognizer.
//!
//! Extracts 512-dimensional embeddings from detected face crops using an
//! ArcFace-style recognition model running on ONNX Runtime.

use crate::types::{Embedding, FaceBox};
use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use thiserror::Error;

const INPUT_SIZE: usize = 112;
const INPUT_MEAN: f32 = 127.5;
const INPUT_STD: f32 = 127.5; // symmetric normalization
/// Dimension of the embeddings the recognition model produces. Gallery
/// encodings must match it for distances to mean anything.
pub const EMBEDDING_DIM: usize = 512;

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("recognition model file not found: {0}")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("face box is empty, nothing to embed")]
    EmptyFace,
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

/// ONNX-backed face recognizer.
#[derive(Debug)]
pub struct FaceRecognizer {
    session: Session,
}

impl FaceRecognizer {
    /// Load the recognition model from the given path.
    pub fn load(model_path: &str) -> Result<Self, RecognizerError> {
        if !Path::new(model_path).exists() {
            return Err(RecognizerError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(2)
            .map_err(ort::Error::from)?
            .commit_from_file(model_path)?;

        tracing::info!(
            path = model_path,
            inputs = ?session.inputs().iter().map(|i| (i.name(), i.dtype())).collect::<Vec<_>>(),
            outputs = ?session.outputs().iter().map(|o| o.name()).collect::<Vec<_>>(),
            "loaded recognition model"
        );

        Ok(Self { session })
    }

    /// Extract an L2-normalized embedding for one detected face.
    pub fn extract(
        &mut self,
        gray: &GrayImage,
        face: &FaceBox,
    ) -> Result<Embedding, RecognizerError> {
        if face.is_empty() {
            return Err(RecognizerError::EmptyFace);
        }

        let crop = imageops::crop_imm(
            gray,
            face.left as u32,
            face.top as u32,
            face.width(),
            face.height(),
        )
        .to_image();
        let resized = imageops::resize(
            &crop,
            INPUT_SIZE as u32,
            INPUT_SIZE as u32,
            FilterType::Triangle,
        );

        let input = Self::preprocess(resized.as_raw());

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        let (_, raw_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| RecognizerError::InferenceFailed(format!("embedding extraction: {e}")))?;

        let raw: Vec<f32> = raw_data.to_vec();
        if raw.len() != EMBEDDING_DIM {
            return Err(RecognizerError::InferenceFailed(format!(
                "expected {EMBEDDING_DIM}-dim embedding, got {}",
                raw.len()
            )));
        }

        // L2-normalize so Euclidean distances are comparable across frames
        let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
        let values = if norm > 0.0 {
            raw.iter().map(|x| x / norm).collect()
        } else {
            raw
        };

        Ok(Embedding::new(values))
    }

    /// Preprocess a 112x112 grayscale face crop into a NCHW float tensor.
    fn preprocess(crop: &[u8]) -> Array4<f32> {
        let size = INPUT_SIZE;
        let mut tensor = Array4::<f32>::zeros((1, 3, size, size));

        for y in 0..size {
            for x in 0..size {
                let pixel = crop.get(y * size + x).copied().unwrap_or(0) as f32;
                let normalized = (pixel - INPUT_MEAN) / INPUT_STD;
                // Grayscale → 3-channel: replicate Y → [R=Y, G=Y, B=Y]
                tensor[[0, 0, y, x]] = normalized;
                tensor[[0, 1, y, x]] = normalized;
                tensor[[0, 2, y, x]] = normalized;
            }
        }

        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_output_shape() {
        let crop = vec![128u8; INPUT_SIZE * INPUT_SIZE];
        let tensor = FaceRecognizer::preprocess(&crop);
        assert_eq!(tensor.shape(), &[1, 3, INPUT_SIZE, INPUT_SIZE]);
    }

    #[test]
    fn test_preprocess_normalization() {
        let crop = vec![128u8; INPUT_SIZE * INPUT_SIZE];
        let tensor = FaceRecognizer::preprocess(&crop);
        let expected = (128.0 - INPUT_MEAN) / INPUT_STD;
        assert!((tensor[[0, 0, 0, 0]] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_preprocess_channels_identical() {
        let crop: Vec<u8> = (0..(INPUT_SIZE * INPUT_SIZE)).map(|i| (i % 251) as u8).collect();
        let tensor = FaceRecognizer::preprocess(&crop);
        for y in 0..INPUT_SIZE {
            for x in 0..INPUT_SIZE {
                assert_eq!(tensor[[0, 0, y, x]], tensor[[0, 1, y, x]]);
                assert_eq!(tensor[[0, 1, y, x]], tensor[[0, 2, y, x]]);
            }
        }
    }

    #[test]
    fn test_load_missing_model() {
        let err = FaceRecognizer::load("/nonexistent/model.onnx").unwrap_err();
        assert!(matches!(err, RecognizerError::ModelNotFound(_)));
    }
}
