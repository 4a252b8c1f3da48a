use crate::shared::frame::Frame;

use super::face_detector::Detection;
use super::face_landmarks::FaceLandmarks;

/// Domain interface for locating facial landmarks inside a detected region.
pub trait LandmarkLocator: Send + Sync {
    fn locate(
        &self,
        frame: &Frame,
        detection: &Detection,
    ) -> Result<FaceLandmarks, Box<dyn std::error::Error>>;
}
