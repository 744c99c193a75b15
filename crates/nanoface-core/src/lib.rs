//! nanoface-core — Face detection and recognition for the camera demo.
//!
//! Detection is delegated to the `rustface` funnel cascade, embedding
//! extraction to an ONNX recognition model via ONNX Runtime. This crate
//! adds the gallery of known encodings and the vote-based matcher that
//! turns embeddings into display names.

pub mod detector;
pub mod gallery;
pub mod matcher;
pub mod recognizer;
pub mod types;

pub use gallery::{Gallery, GalleryEntry};
pub use matcher::{VoteMatcher, DEFAULT_TOLERANCE, UNKNOWN_LABEL};
pub use types::{Embedding, FaceBox};
