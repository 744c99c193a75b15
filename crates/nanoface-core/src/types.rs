/// Bounding box for a detected face, in (top, right, bottom, left) order.
///
/// Coordinates are pixels in the frame the face was detected in. `top` may
/// be smaller than a label offset, so fields are signed even though a
/// clamped box never leaves the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
    pub score: f32,
}

impl FaceBox {
    /// Build a box from detector output in (x, y, w, h) form, clamped to
    /// the frame so downstream crops never index out of bounds.
    pub fn from_rect(x: i32, y: i32, w: u32, h: u32, frame_w: u32, frame_h: u32, score: f32) -> Self {
        let left = x.clamp(0, frame_w as i32);
        let top = y.clamp(0, frame_h as i32);
        let right = (x + w as i32).clamp(left, frame_w as i32);
        let bottom = (y + h as i32).clamp(top, frame_h as i32);
        Self { top, right, bottom, left, score }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Face embedding vector (512-dimensional for the bundled recognition model).
#[derive(Debug, Clone)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Euclidean distance to another embedding. Lower = more similar.
    pub fn distance(&self, other: &Embedding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical() {
        let a = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert!(a.distance(&a).abs() < 1e-6);
    }

    #[test]
    fn test_distance_unit_axes() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 1.0]);
        assert!((a.distance(&b) - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Embedding::new(vec![0.3, -0.7, 0.2]);
        let b = Embedding::new(vec![-0.1, 0.4, 0.9]);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_from_rect_inside_frame() {
        let b = FaceBox::from_rect(10, 20, 30, 40, 100, 100, 0.9);
        assert_eq!((b.top, b.right, b.bottom, b.left), (20, 40, 60, 10));
        assert_eq!(b.width(), 30);
        assert_eq!(b.height(), 40);
    }

    #[test]
    fn test_from_rect_clamps_negative_origin() {
        let b = FaceBox::from_rect(-5, -5, 20, 20, 100, 100, 0.9);
        assert_eq!((b.top, b.left), (0, 0));
        assert_eq!((b.right, b.bottom), (15, 15));
    }

    #[test]
    fn test_from_rect_clamps_overflow() {
        let b = FaceBox::from_rect(90, 90, 50, 50, 100, 100, 0.9);
        assert_eq!((b.right, b.bottom), (100, 100));
        assert!(!b.is_empty());
    }

    #[test]
    fn test_from_rect_degenerate_is_empty() {
        let b = FaceBox::from_rect(100, 100, 10, 10, 100, 100, 0.9);
        assert!(b.is_empty());
    }
}
