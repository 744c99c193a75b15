//! Jetson CSI camera capture through a GStreamer subprocess.
//!
//! The pipeline string from [`crate::source::JetsonPipeline`] ends in an
//! `fdsink` on stdout, so `gst-launch-1.0` itself owns the camera pipeline
//! and this module just reads fixed-size raw RGB frames from the pipe.

use crate::capture::{CaptureError, FrameSource};
use crate::frame::RgbFrame;
use crate::source::JetsonPipeline;
use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Handle to a running `gst-launch-1.0` child producing raw RGB frames.
pub struct GstCamera {
    child: Child,
    stdout: ChildStdout,
    width: u32,
    height: u32,
    frame_len: usize,
}

impl GstCamera {
    /// Spawn the pipeline and attach to its frame stream.
    pub fn open(pipeline: &JetsonPipeline) -> Result<Self, CaptureError> {
        let rendered = pipeline.render();

        // gst-launch re-joins its arguments with spaces before parsing, so
        // splitting the rendered pipeline on whitespace is lossless.
        let mut child = Command::new("gst-launch-1.0")
            .arg("-q")
            .args(rendered.split_whitespace())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(CaptureError::SpawnFailed)?;

        let stdout = child.stdout.take().ok_or(CaptureError::PipelineClosed)?;

        tracing::info!(
            width = pipeline.display_width,
            height = pipeline.display_height,
            framerate = pipeline.framerate,
            "GStreamer pipeline started"
        );

        Ok(Self {
            child,
            stdout,
            width: pipeline.display_width,
            height: pipeline.display_height,
            frame_len: pipeline.frame_len(),
        })
    }
}

impl FrameSource for GstCamera {
    fn next_frame(&mut self) -> Result<RgbFrame, CaptureError> {
        let mut data = vec![0u8; self.frame_len];
        self.stdout.read_exact(&mut data).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                CaptureError::PipelineClosed
            } else {
                CaptureError::CaptureFailed(format!("pipe read failed: {e}"))
            }
        })?;

        Ok(RgbFrame {
            data,
            width: self.width,
            height: self.height,
        })
    }
}

impl Drop for GstCamera {
    fn drop(&mut self) {
        // Releasing the camera means tearing down the whole child pipeline.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
