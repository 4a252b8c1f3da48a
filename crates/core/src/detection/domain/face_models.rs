use super::face_detector::FaceDetector;
use super::face_embedder::FaceEmbedder;
use super::landmark_locator::LandmarkLocator;

/// The three pretrained collaborators, constructed once per process and
/// shared read-only (usually behind an `Arc`).
pub struct FaceModels {
    pub detector: Box<dyn FaceDetector>,
    pub locator: Box<dyn LandmarkLocator>,
    pub embedder: Box<dyn FaceEmbedder>,
}

impl FaceModels {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        locator: Box<dyn LandmarkLocator>,
        embedder: Box<dyn FaceEmbedder>,
    ) -> Self {
        Self {
            detector,
            locator,
            embedder,
        }
    }
}
