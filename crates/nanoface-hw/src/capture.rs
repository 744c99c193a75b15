//! Blocking frame acquisition over either capture backend.

use crate::camera::V4lCamera;
use crate::frame::{FrameError, RgbFrame};
use crate::gst::GstCamera;
use crate::source::CameraSource;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),
    #[error("device busy")]
    DeviceBusy,
    #[error("format negotiation failed: {0}")]
    FormatNegotiationFailed(String),
    #[error("capture failed: {0}")]
    CaptureFailed(String),
    #[error("failed to spawn gst-launch-1.0: {0}")]
    SpawnFailed(std::io::Error),
    #[error("GStreamer pipeline closed its output")]
    PipelineClosed,
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// A blocking source of RGB frames. Each call blocks until one frame is
/// available; there is no queueing behind it.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<RgbFrame, CaptureError>;
}

/// Open the capture backend for a selected source.
pub fn open_source(source: &CameraSource) -> Result<Box<dyn FrameSource>, CaptureError> {
    match source {
        CameraSource::Device(index) => {
            tracing::info!(index = *index, "opening V4L2 camera");
            Ok(Box::new(V4lCamera::open(*index)?))
        }
        CameraSource::Jetson(pipeline) => {
            tracing::info!(pipeline = %pipeline.render(), "opening Jetson GStreamer source");
            Ok(Box::new(GstCamera::open(pipeline)?))
        }
    }
}
