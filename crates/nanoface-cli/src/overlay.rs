//! Name-overlay bookkeeping and annotated frame presentation.

use image::RgbImage;
use macroquad::prelude::*;
use nanoface_core::FaceBox;

const BOX_THICKNESS: f32 = 2.0;
const LABEL_OFFSET: i32 = 15;
const LABEL_FONT_SIZE: f32 = 24.0;

/// One detection plus the name to draw for it. Valid only within the
/// iteration that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub face: FaceBox,
    pub name: String,
}

/// Pair detections with their resolved names.
pub fn pair_labels(faces: Vec<FaceBox>, names: Vec<String>) -> Vec<Annotation> {
    faces
        .into_iter()
        .zip(names)
        .map(|(face, name)| Annotation { face, name })
        .collect()
}

/// Vertical anchor for a name label: above the box unless the box sits near
/// the top edge of the frame, then below it.
pub fn label_y(top: i32) -> i32 {
    if top - LABEL_OFFSET > LABEL_OFFSET {
        top - LABEL_OFFSET
    } else {
        top + LABEL_OFFSET
    }
}

/// Draw the frame and its box/name overlays.
pub fn present(texture: &mut Option<Texture2D>, frame: &RgbImage, annotations: &[Annotation]) {
    let (sx, sy) = crate::display::blit(texture, frame);

    for ann in annotations {
        let face = &ann.face;
        draw_rectangle_lines(
            face.left as f32 * sx,
            face.top as f32 * sy,
            face.width() as f32 * sx,
            face.height() as f32 * sy,
            BOX_THICKNESS,
            GREEN,
        );
        draw_text(
            &ann.name,
            face.left as f32 * sx,
            label_y(face.top) as f32 * sy,
            LABEL_FONT_SIZE,
            GREEN,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(top: i32) -> FaceBox {
        FaceBox {
            top,
            right: 100,
            bottom: top + 50,
            left: 50,
            score: 1.0,
        }
    }

    #[test]
    fn test_label_above_box() {
        assert_eq!(label_y(100), 85);
    }

    #[test]
    fn test_label_below_box_near_top_edge() {
        assert_eq!(label_y(20), 35);
        assert_eq!(label_y(0), 15);
    }

    #[test]
    fn test_label_boundary() {
        // top - 15 must be strictly greater than 15 to go above
        assert_eq!(label_y(31), 16);
        assert_eq!(label_y(30), 45);
    }

    #[test]
    fn test_pair_labels_zero_detections() {
        assert!(pair_labels(vec![], vec![]).is_empty());
    }

    #[test]
    fn test_pair_labels_keeps_order() {
        let annotations = pair_labels(
            vec![face(40), face(80)],
            vec!["ada".to_string(), "Stranger".to_string()],
        );
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].name, "ada");
        assert_eq!(annotations[0].face.top, 40);
        assert_eq!(annotations[1].name, "Stranger");
    }
}
