//! RGB frame type and YUYV pixel format conversion.

use image::RgbImage;
use thiserror::Error;

/// A captured RGB camera frame (3 bytes per pixel, row-major).
#[derive(Clone)]
pub struct RgbFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbFrame {
    /// View the frame as an [`image::RgbImage`]. Fails only if the buffer
    /// length does not match the stated dimensions.
    pub fn into_image(self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data)
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid YUYV length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Convert packed YUYV (4:2:2) to RGB using BT.601 coefficients.
///
/// YUYV packs two pixels per 4 bytes: [Y0, U, Y1, V], with chroma shared
/// across the pixel pair.
pub fn yuyv_to_rgb(yuyv: &[u8], width: u32, height: u32) -> Result<Vec<u8>, FrameError> {
    let expected = (width * height * 2) as usize;
    if yuyv.len() < expected {
        return Err(FrameError::InvalidLength {
            expected,
            actual: yuyv.len(),
        });
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for chunk in yuyv[..expected].chunks_exact(4) {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        push_pixel(&mut rgb, y0, u, v);
        push_pixel(&mut rgb, y1, u, v);
    }
    Ok(rgb)
}

fn push_pixel(rgb: &mut Vec<u8>, y: u8, u: u8, v: u8) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = y + 1.402 * v;
    let g = y - 0.344 * u - 0.714 * v;
    let b = y + 1.772 * u;

    rgb.push(r.round().clamp(0.0, 255.0) as u8);
    rgb.push(g.round().clamp(0.0, 255.0) as u8);
    rgb.push(b.round().clamp(0.0, 255.0) as u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuyv_neutral_chroma_is_gray() {
        // U = V = 128 → R = G = B = Y
        let yuyv = vec![100, 128, 200, 128];
        let rgb = yuyv_to_rgb(&yuyv, 2, 1).unwrap();
        assert_eq!(rgb, vec![100, 100, 100, 200, 200, 200]);
    }

    #[test]
    fn test_yuyv_output_length() {
        let yuyv = vec![128u8; 4 * 2 * 2]; // 4x2 frame
        let rgb = yuyv_to_rgb(&yuyv, 4, 2).unwrap();
        assert_eq!(rgb.len(), 4 * 2 * 3);
    }

    #[test]
    fn test_yuyv_red_bias() {
        // High V pushes red up and green down.
        let yuyv = vec![128, 128, 128, 255];
        let rgb = yuyv_to_rgb(&yuyv, 2, 1).unwrap();
        assert!(rgb[0] > 200, "r = {}", rgb[0]);
        assert!(rgb[1] < 128, "g = {}", rgb[1]);
        assert_eq!(rgb[2], 128); // U neutral → blue unchanged
    }

    #[test]
    fn test_yuyv_invalid_length() {
        let result = yuyv_to_rgb(&[100, 128], 2, 1);
        assert!(matches!(result, Err(FrameError::InvalidLength { .. })));
    }

    #[test]
    fn test_into_image_roundtrip() {
        let frame = RgbFrame {
            data: vec![0u8; 4 * 3 * 3],
            width: 4,
            height: 3,
        };
        let img = frame.into_image().unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[test]
    fn test_into_image_bad_length() {
        let frame = RgbFrame {
            data: vec![0u8; 5],
            width: 4,
            height: 3,
        };
        assert!(frame.into_image().is_none());
    }
}
