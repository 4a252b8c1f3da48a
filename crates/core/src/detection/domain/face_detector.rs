use crate::shared::face_box::BBox;
use crate::shared::frame::Frame;

use super::face_landmarks::FaceLandmarks;

/// A candidate face region as reported by the detector.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Raw box in frame pixels; may extend past the frame edges.
    pub bbox: BBox,
    /// Detection score. `0.0` is the detector's neutral operating point,
    /// higher means more face-like.
    pub score: f64,
    /// Keypoints predicted together with the box, when the model has them.
    pub keypoints: Option<FaceLandmarks>,
}

/// Domain interface for face detection.
///
/// Models are loaded once and shared read-only, hence `&self`.
pub trait FaceDetector: Send + Sync {
    /// Returns every face whose score is at least `min_score`.
    fn detect(
        &self,
        frame: &Frame,
        min_score: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
