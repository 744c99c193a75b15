//! Gallery of known face encodings, loaded once at startup.
//!
//! The on-disk format is a JSON object with two parallel arrays, keys
//! `"encodings"` (sequence of f32 vectors) and `"names"` (sequence of
//! strings). The gallery is read-only input for the lifetime of the process.

use crate::types::Embedding;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("failed to read gallery file: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed gallery file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("gallery arrays out of step: {encodings} encodings vs {names} names")]
    LengthMismatch { encodings: usize, names: usize },
    #[error("gallery encoding {index} is {actual}-dimensional, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Serialized gallery schema: parallel `encodings` / `names` arrays.
#[derive(Deserialize)]
struct GalleryFile {
    encodings: Vec<Vec<f32>>,
    names: Vec<String>,
}

/// One known face: an embedding and the name to display for it.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub name: String,
    pub embedding: Embedding,
}

/// Ordered set of known (embedding, name) pairs. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Load and validate a serialized gallery.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GalleryError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let gallery = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            entries = gallery.len(),
            "loaded gallery"
        );
        Ok(gallery)
    }

    /// Parse a gallery from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, GalleryError> {
        let file: GalleryFile = serde_json::from_str(raw)?;
        if file.encodings.len() != file.names.len() {
            return Err(GalleryError::LengthMismatch {
                encodings: file.encodings.len(),
                names: file.names.len(),
            });
        }
        // Every encoding must have the same dimension; a ragged gallery
        // would make distance comparisons meaningless.
        if let Some(first) = file.encodings.first() {
            let expected = first.len();
            for (index, values) in file.encodings.iter().enumerate() {
                if values.len() != expected {
                    return Err(GalleryError::DimensionMismatch {
                        index,
                        expected,
                        actual: values.len(),
                    });
                }
            }
        }
        let entries = file
            .encodings
            .into_iter()
            .zip(file.names)
            .map(|(values, name)| GalleryEntry {
                name,
                embedding: Embedding::new(values),
            })
            .collect();
        Ok(Self { entries })
    }

    /// Build a gallery directly from pairs. Used by tests and tooling.
    pub fn from_entries(entries: Vec<GalleryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Embedding dimension of the gallery, or `None` when it is empty.
    /// Uniform across entries; [`Gallery::from_json`] enforces that.
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|e| e.embedding.values.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_valid() {
        let raw = r#"{
            "encodings": [[0.1, 0.2], [0.3, 0.4]],
            "names": ["ada", "grace"]
        }"#;
        let gallery = Gallery::from_json(raw).unwrap();
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.entries()[0].name, "ada");
        assert_eq!(gallery.entries()[1].embedding.values, vec![0.3, 0.4]);
    }

    #[test]
    fn test_from_json_length_mismatch() {
        let raw = r#"{
            "encodings": [[0.1, 0.2]],
            "names": ["ada", "grace"]
        }"#;
        let err = Gallery::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::LengthMismatch { encodings: 1, names: 2 }
        ));
    }

    #[test]
    fn test_from_json_ragged_dimensions() {
        // 128-dim encodings next to a 512-dim one must not load; a zipped
        // distance would otherwise compare only the shorter prefix.
        let raw = r#"{
            "encodings": [[0.1, 0.2], [0.3, 0.4, 0.5]],
            "names": ["ada", "grace"]
        }"#;
        let err = Gallery::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::DimensionMismatch { index: 1, expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn test_dimension() {
        let gallery = Gallery::from_json(r#"{"encodings": [[0.1, 0.2]], "names": ["ada"]}"#).unwrap();
        assert_eq!(gallery.dimension(), Some(2));
        assert_eq!(Gallery::default().dimension(), None);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Gallery::from_json("not json").unwrap_err(),
            GalleryError::Parse(_)
        ));
    }

    #[test]
    fn test_from_json_empty() {
        let gallery = Gallery::from_json(r#"{"encodings": [], "names": []}"#).unwrap();
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Gallery::load("/nonexistent/encodings.json").unwrap_err(),
            GalleryError::Read(_)
        ));
    }
}
