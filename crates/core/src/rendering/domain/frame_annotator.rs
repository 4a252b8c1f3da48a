use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for drawing markers on top of a frame, in place.
pub trait FrameAnnotator: Send {
    /// Outline `face_box` to mark it as a recognised target.
    fn outline(&self, frame: &mut Frame, face_box: &FaceBox);

    /// Print `text` just above the top-left corner of `face_box`.
    fn label(&self, frame: &mut Frame, face_box: &FaceBox, text: &str);
}
