use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::shared::face_box::FaceBox;

use super::face_embedding::FaceEmbedding;

/// A face found in one frame, with everything needed to match it.
/// Lives only while its frame is processed.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedFace {
    /// Clamped to the frame.
    pub face_box: FaceBox,
    pub landmarks: FaceLandmarks,
    pub embedding: FaceEmbedding,
}
