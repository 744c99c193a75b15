//! nanoface-hw — Camera source selection and frame capture.
//!
//! Chooses between a plain V4L2 device index (laptop webcam) and a Jetson
//! Nano CSI camera reached through a GStreamer pipeline, and provides a
//! blocking [`FrameSource`] over either.

pub mod camera;
pub mod capture;
pub mod frame;
pub mod gst;
pub mod source;

pub use capture::{open_source, CaptureError, FrameSource};
pub use frame::RgbFrame;
pub use source::{select_source, CameraSource, JetsonPipeline};
