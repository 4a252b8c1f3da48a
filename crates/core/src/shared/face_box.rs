/// Raw detector box as `(x1, y1, x2, y2)` in frame pixels, possibly
/// extending past the frame edges.
pub type BBox = (f64, f64, f64, f64);

/// Integer face box in frame pixels, `left`/`top` inclusive and
/// `right`/`bottom` exclusive.
///
/// Boxes produced by [`FaceBox::clamped`] always satisfy
/// `0 <= left <= right <= width` and `0 <= top <= bottom <= height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FaceBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rounds a raw detector box to the nearest pixel, without clamping.
    pub fn from_bbox(bbox: BBox) -> Self {
        Self {
            left: bbox.0.round() as i32,
            top: bbox.1.round() as i32,
            right: bbox.2.round() as i32,
            bottom: bbox.3.round() as i32,
        }
    }

    /// Clamps the box into a `frame_w` x `frame_h` frame.
    ///
    /// A box lying entirely outside the frame collapses to an empty box on
    /// the nearest edge instead of inverting.
    pub fn clamped(&self, frame_w: u32, frame_h: u32) -> Self {
        let fw = frame_w as i32;
        let fh = frame_h as i32;
        let left = self.left.clamp(0, fw);
        let top = self.top.clamp(0, fh);
        Self {
            left,
            top,
            right: self.right.clamp(left, fw),
            bottom: self.bottom.clamp(top, fh),
        }
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_bbox_rounds_to_nearest_pixel() {
        let b = FaceBox::from_bbox((10.4, 20.6, 99.5, 120.49));
        assert_eq!(b, FaceBox::new(10, 21, 100, 120));
    }

    #[test]
    fn test_clamped_inside_frame_unchanged() {
        let b = FaceBox::new(10, 20, 50, 60);
        assert_eq!(b.clamped(100, 100), b);
    }

    #[test]
    fn test_clamped_negative_origin() {
        let b = FaceBox::new(-15, -3, 40, 30).clamped(100, 100);
        assert_eq!(b, FaceBox::new(0, 0, 40, 30));
    }

    #[test]
    fn test_clamped_past_far_edges() {
        let b = FaceBox::new(80, 70, 130, 150).clamped(100, 90);
        assert_eq!(b, FaceBox::new(80, 70, 100, 90));
    }

    #[rstest]
    #[case::left_of_frame(FaceBox::new(-50, 10, -10, 40))]
    #[case::right_of_frame(FaceBox::new(120, 10, 160, 40))]
    #[case::above_frame(FaceBox::new(10, -40, 40, -5))]
    #[case::below_frame(FaceBox::new(10, 95, 40, 140))]
    #[case::inverted(FaceBox::new(60, 60, 20, 20))]
    fn test_clamped_never_inverts(#[case] raw: FaceBox) {
        let b = raw.clamped(100, 90);
        assert!(0 <= b.left && b.left <= b.right && b.right <= 100);
        assert!(0 <= b.top && b.top <= b.bottom && b.bottom <= 90);
    }

    #[test]
    fn test_dimensions() {
        let b = FaceBox::new(10, 20, 40, 70);
        assert_eq!(b.width(), 30);
        assert_eq!(b.height(), 50);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_empty_box() {
        assert!(FaceBox::new(0, 0, 0, 10).is_empty());
        assert!(FaceBox::new(5, 5, 10, 5).is_empty());
    }
}
