use crate::detection::domain::face_detector::Detection;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::landmark_locator::LandmarkLocator;
use crate::shared::frame::Frame;

/// Landmark locator that reuses the keypoints predicted by the detector.
///
/// Keypoints the detector was unsure of, or missing altogether, are filled
/// in from the alignment template scaled into the detection box.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeypointLandmarkLocator;

impl KeypointLandmarkLocator {
    pub fn new() -> Self {
        Self
    }
}

impl LandmarkLocator for KeypointLandmarkLocator {
    fn locate(
        &self,
        _frame: &Frame,
        detection: &Detection,
    ) -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
        let estimate = FaceLandmarks::estimate_from_box(detection.bbox);
        Ok(match &detection.keypoints {
            Some(keypoints) => keypoints.completed_with(&estimate),
            None => estimate,
        })
    }
}
