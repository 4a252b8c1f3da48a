use crate::recognition::domain::face_embedding::FaceEmbedding;
use crate::shared::frame::Frame;

use super::face_landmarks::FaceLandmarks;

/// Domain interface for computing an identity embedding from a face.
///
/// Smaller Euclidean distance between two embeddings means the faces are
/// more likely to belong to the same person.
pub trait FaceEmbedder: Send + Sync {
    fn embed(
        &self,
        frame: &Frame,
        landmarks: &FaceLandmarks,
    ) -> Result<FaceEmbedding, Box<dyn std::error::Error>>;
}
