//! V4L2 webcam capture via the `v4l` crate.

use crate::capture::{CaptureError, FrameSource};
use crate::frame::{self, RgbFrame};
use v4l::buffer::Type as BufType;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

const REQUESTED_WIDTH: u32 = 1280;
const REQUESTED_HEIGHT: u32 = 720;
const STREAM_BUFFERS: u32 = 4;

/// V4L2 camera opened by device index.
pub struct V4lCamera {
    device: Device,
    width: u32,
    height: u32,
}

impl V4lCamera {
    /// Open /dev/video{index} and negotiate a YUYV format.
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let device = Device::new(index as usize).map_err(|e| {
            if e.to_string().contains("busy") || e.to_string().contains("EBUSY") {
                CaptureError::DeviceBusy
            } else {
                CaptureError::DeviceNotFound(format!("/dev/video{index}: {e}"))
            }
        })?;

        let caps = device
            .query_caps()
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to query capabilities: {e}")))?;

        tracing::info!(
            index,
            driver = %caps.driver,
            card = %caps.card,
            "opened camera"
        );

        if !caps.capabilities.contains(v4l::capability::Flags::VIDEO_CAPTURE) {
            return Err(CaptureError::FormatNegotiationFailed(
                "device does not support video capture".into(),
            ));
        }

        let mut fmt = device
            .format()
            .map_err(|e| CaptureError::FormatNegotiationFailed(format!("failed to get format: {e}")))?;

        fmt.fourcc = FourCC::new(b"YUYV");
        fmt.width = REQUESTED_WIDTH;
        fmt.height = REQUESTED_HEIGHT;

        let negotiated = device
            .set_format(&fmt)
            .map_err(|e| CaptureError::FormatNegotiationFailed(format!("failed to set format: {e}")))?;

        // The demo renders color frames, so YUYV is required; grayscale-only
        // IR cameras are not useful here.
        if negotiated.fourcc != FourCC::new(b"YUYV") {
            return Err(CaptureError::FormatNegotiationFailed(format!(
                "device negotiated {:?}, need YUYV",
                negotiated.fourcc
            )));
        }

        tracing::info!(
            width = negotiated.width,
            height = negotiated.height,
            fourcc = ?negotiated.fourcc,
            "negotiated format"
        );

        Ok(Self {
            device,
            width: negotiated.width,
            height: negotiated.height,
        })
    }
}

impl FrameSource for V4lCamera {
    fn next_frame(&mut self) -> Result<RgbFrame, CaptureError> {
        let mut stream = MmapStream::with_buffers(&self.device, BufType::VideoCapture, STREAM_BUFFERS)
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to create mmap stream: {e}")))?;

        let (buf, _meta) = stream
            .next()
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to dequeue buffer: {e}")))?;

        let data = frame::yuyv_to_rgb(buf, self.width, self.height)?;
        Ok(RgbFrame {
            data,
            width: self.width,
            height: self.height,
        })
    }
}
