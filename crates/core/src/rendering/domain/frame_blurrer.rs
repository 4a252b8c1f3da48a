use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for applying blur to specified regions within a frame.
///
/// Implementations modify the frame in-place (`&mut Frame`) to avoid allocation.
/// Boxes are expected to be clamped to the frame already.
pub trait FrameBlurrer: Send {
    fn blur(&self, frame: &mut Frame, boxes: &[FaceBox])
        -> Result<(), Box<dyn std::error::Error>>;
}
