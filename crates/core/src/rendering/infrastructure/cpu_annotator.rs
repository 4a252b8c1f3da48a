use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::shared::constants::{LABEL_COLOR, OUTLINE_COLOR, OUTLINE_THICKNESS};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

use super::bitmap_font;

const LABEL_SCALE: usize = 2;
/// Gap between the label baseline and the box's top edge.
const LABEL_MARGIN: i64 = 2;

/// Draws target outlines and distance labels directly into the RGB buffer.
pub struct CpuAnnotator {
    outline_color: [u8; 3],
    thickness: u32,
    label_color: [u8; 3],
}

impl CpuAnnotator {
    pub fn new(outline_color: [u8; 3], thickness: u32, label_color: [u8; 3]) -> Self {
        Self {
            outline_color,
            thickness: thickness.max(1),
            label_color,
        }
    }
}

impl Default for CpuAnnotator {
    fn default() -> Self {
        Self::new(OUTLINE_COLOR, OUTLINE_THICKNESS, LABEL_COLOR)
    }
}

impl FrameAnnotator for CpuAnnotator {
    /// Each edge is a band `thickness` pixels wide centred on the box line.
    fn outline(&self, frame: &mut Frame, face_box: &FaceBox) {
        let t = self.thickness as i64;
        let lo = -(t / 2);
        let hi = lo + t;

        let (l, top, r, b) = (
            face_box.left as i64,
            face_box.top as i64,
            face_box.right as i64,
            face_box.bottom as i64,
        );

        // Horizontal edges, spanning the corners.
        for d in lo..hi {
            for x in (l + lo)..(r + hi) {
                frame.put_pixel(x, top + d, self.outline_color);
                frame.put_pixel(x, b + d, self.outline_color);
            }
        }
        // Vertical edges.
        for d in lo..hi {
            for y in (top + lo)..(b + hi) {
                frame.put_pixel(l + d, y, self.outline_color);
                frame.put_pixel(r + d, y, self.outline_color);
            }
        }
    }

    fn label(&self, frame: &mut Frame, face_box: &FaceBox, text: &str) {
        let (w, h) = bitmap_font::measure(text, LABEL_SCALE);
        let (w, h) = (w as i64, h as i64);
        let fw = frame.width() as i64;
        let fh = frame.height() as i64;

        let x = (face_box.left as i64).min(fw - w).max(0);
        let y = (face_box.top as i64 - LABEL_MARGIN - h).min(fh - h).max(0);
        bitmap_font::draw_text(frame, x, y, text, self.label_color, LABEL_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let i = frame.offset(x, y);
        [frame.data()[i], frame.data()[i + 1], frame.data()[i + 2]]
    }

    #[test]
    fn test_outline_draws_three_pixel_red_band() {
        let mut frame = Frame::filled(100, 100, [0, 0, 0], 0);
        CpuAnnotator::default().outline(&mut frame, &FaceBox::new(20, 30, 60, 70));

        for y in 29..=31 {
            assert_eq!(pixel(&frame, 40, y), OUTLINE_COLOR, "top edge y={y}");
        }
        assert_eq!(pixel(&frame, 40, 28), [0, 0, 0]);
        assert_eq!(pixel(&frame, 40, 32), [0, 0, 0]);
        for x in 59..=61 {
            assert_eq!(pixel(&frame, x, 50), OUTLINE_COLOR, "right edge x={x}");
        }
        assert_eq!(pixel(&frame, 19, 29), OUTLINE_COLOR, "corner");
    }

    #[test]
    fn test_outline_leaves_interior_untouched() {
        let mut frame = Frame::filled(100, 100, [7, 7, 7], 0);
        CpuAnnotator::default().outline(&mut frame, &FaceBox::new(20, 30, 60, 70));
        for y in 32..69 {
            for x in 22..59 {
                assert_eq!(pixel(&frame, x, y), [7, 7, 7]);
            }
        }
    }

    #[test]
    fn test_outline_clips_at_frame_edges() {
        let mut frame = Frame::filled(40, 40, [0, 0, 0], 0);
        CpuAnnotator::default().outline(&mut frame, &FaceBox::new(0, 0, 40, 40));
        assert_eq!(pixel(&frame, 0, 0), OUTLINE_COLOR);
        assert_eq!(pixel(&frame, 39, 39), OUTLINE_COLOR);
        assert_eq!(pixel(&frame, 20, 20), [0, 0, 0]);
    }

    #[test]
    fn test_label_sits_above_box() {
        let mut frame = Frame::filled(200, 200, [0, 0, 0], 0);
        let face_box = FaceBox::new(50, 100, 120, 170);
        CpuAnnotator::default().label(&mut frame, &face_box, "0.1234");

        let mut painted = Vec::new();
        for y in 0..200 {
            for x in 0..200 {
                if pixel(&frame, x, y) == LABEL_COLOR {
                    painted.push((x, y));
                }
            }
        }
        assert!(!painted.is_empty());
        assert!(painted.iter().all(|&(x, y)| y < 100 && x >= 50));
    }

    #[test]
    fn test_label_at_top_edge_stays_in_frame() {
        let mut frame = Frame::filled(100, 100, [0, 0, 0], 0);
        CpuAnnotator::default().label(&mut frame, &FaceBox::new(0, 0, 30, 30), "0.5");
        let lit = (0..10).any(|y| (0..20).any(|x| pixel(&frame, x, y) == LABEL_COLOR));
        assert!(lit);
    }
}
