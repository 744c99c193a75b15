//! Camera source selection.
//!
//! A laptop reaches its webcam through a plain V4L2 device index; the
//! Jetson Nano CSI camera needs a GStreamer pipeline built from a
//! known-good template. The choice is made from the host machine
//! architecture, the same check the original hardware used.

/// Machine identifier reported by the Jetson Nano (and other embedded ARM).
pub const JETSON_MACHINE: &str = "aarch64";

/// Fixed fields interpolated into the Jetson GStreamer template.
///
/// The template itself is fixed and known good, so rendering never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JetsonPipeline {
    pub capture_width: u32,
    pub capture_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub framerate: u32,
    pub flip_method: u32,
}

impl Default for JetsonPipeline {
    fn default() -> Self {
        Self {
            capture_width: 1280,
            capture_height: 720,
            display_width: 1280,
            display_height: 720,
            framerate: 60,
            flip_method: 0,
        }
    }
}

impl JetsonPipeline {
    /// Render the pipeline description string.
    ///
    /// Ends in an `fdsink` on stdout so the consuming process can read raw
    /// RGB frames of `display_width * display_height * 3` bytes.
    pub fn render(&self) -> String {
        format!(
            "nvarguscamerasrc ! video/x-raw(memory:NVMM), \
             width=(int){cw}, height=(int){ch}, format=(string)NV12, \
             framerate=(fraction){fr}/1 ! \
             nvvidconv flip-method={flip} ! \
             video/x-raw, width=(int){dw}, height=(int){dh}, format=(string)BGRx ! \
             videoconvert ! video/x-raw, format=(string)RGB ! fdsink fd=1",
            cw = self.capture_width,
            ch = self.capture_height,
            fr = self.framerate,
            flip = self.flip_method,
            dw = self.display_width,
            dh = self.display_height,
        )
    }

    /// Size in bytes of one raw RGB frame produced by this pipeline.
    pub fn frame_len(&self) -> usize {
        (self.display_width * self.display_height * 3) as usize
    }
}

/// Where frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraSource {
    /// Plain V4L2 device index (e.g., 0 for /dev/video0).
    Device(u32),
    /// Jetson Nano CSI camera via GStreamer.
    Jetson(JetsonPipeline),
}

/// Select the camera source for this host.
pub fn select_source(device_index: u32, pipeline: JetsonPipeline) -> CameraSource {
    source_for_machine(std::env::consts::ARCH, device_index, pipeline)
}

/// Pure selection rule, split out so the platform check is testable.
pub fn source_for_machine(
    machine: &str,
    device_index: u32,
    pipeline: JetsonPipeline,
) -> CameraSource {
    if machine == JETSON_MACHINE {
        CameraSource::Jetson(pipeline)
    } else {
        CameraSource::Device(device_index)
    }
}
