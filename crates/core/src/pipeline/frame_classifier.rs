use std::error::Error;
use std::sync::Arc;

use crate::detection::domain::face_detector::Detection;
use crate::detection::domain::face_models::FaceModels;
use crate::recognition::domain::detected_face::DetectedFace;
use crate::recognition::domain::recognition_mode::RecognitionMode;
use crate::recognition::domain::target_assignment::{assign_targets, Assignment, Candidate};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;
use crate::shared::redaction_settings::RedactionSettings;

/// Decides, per frame, which detected faces are targets and which get
/// blurred.
///
/// In `BlurAll` mode only the detector runs. In `BlurExceptTargets` mode
/// every face is described (landmarks + embedding), scored by its minimum
/// distance to the reference set and ranked; at most `N` faces (the
/// reference count) can become targets.
pub struct FrameClassifier {
    models: Arc<FaceModels>,
    mode: RecognitionMode,
    settings: RedactionSettings,
}

impl FrameClassifier {
    pub fn new(models: Arc<FaceModels>, mode: RecognitionMode, settings: RedactionSettings) -> Self {
        Self {
            models,
            mode,
            settings,
        }
    }

    /// Returns one assignment per detected face. Boxes are clamped to the
    /// frame; detections with nothing left inside it are dropped before
    /// ranking. An empty result means the frame must be left untouched.
    pub fn classify(&self, frame: &Frame) -> Result<Vec<Assignment>, Box<dyn Error>> {
        let detections: Vec<Detection> = self
            .models
            .detector
            .detect(frame, self.settings.detection_threshold)?
            .into_iter()
            .filter(|d| !clamped_box(frame, d).is_empty())
            .collect();

        let references = match &self.mode {
            RecognitionMode::BlurAll => {
                return Ok(detections
                    .iter()
                    .map(|d| Assignment::blurred(clamped_box(frame, d)))
                    .collect());
            }
            RecognitionMode::BlurExceptTargets(references) => references,
        };

        let mut candidates = Vec::with_capacity(detections.len());
        for detection in &detections {
            let face = describe(&self.models, frame, detection)?;
            candidates.push(Candidate {
                face_box: face.face_box,
                distance: references.min_distance(&face.embedding),
            });
        }

        Ok(assign_targets(
            candidates,
            references.len(),
            self.settings.recognition_threshold,
        ))
    }
}

/// Runs the landmark locator and embedder on one detection.
pub fn describe(
    models: &FaceModels,
    frame: &Frame,
    detection: &Detection,
) -> Result<DetectedFace, Box<dyn Error>> {
    let landmarks = models.locator.locate(frame, detection)?;
    let embedding = models.embedder.embed(frame, &landmarks)?;
    Ok(DetectedFace {
        face_box: clamped_box(frame, detection),
        landmarks,
        embedding,
    })
}

fn clamped_box(frame: &Frame, detection: &Detection) -> FaceBox {
    FaceBox::from_bbox(detection.bbox).clamped(frame.width(), frame.height())
}

#[cfg(test)]
pub(crate) mod stubs {
    //! Collaborator stubs shared by the pipeline tests.
    //!
    //! The stub locator puts the detection's top-left corner in every
    //! landmark slot; the stub embedder turns that corner's `x` into a
    //! one-dimensional embedding looked up in a table. With a reference of
    //! `[0.0]` the table value is the face's distance.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::detection::domain::face_detector::{Detection, FaceDetector};
    use crate::detection::domain::face_embedder::FaceEmbedder;
    use crate::detection::domain::face_landmarks::FaceLandmarks;
    use crate::detection::domain::face_models::FaceModels;
    use crate::detection::domain::landmark_locator::LandmarkLocator;
    use crate::recognition::domain::face_embedding::FaceEmbedding;
    use crate::shared::face_box::BBox;
    use crate::shared::frame::Frame;

    pub struct StubDetector {
        /// Faces found in every frame, as `(bbox, score)`.
        pub faces: Vec<(BBox, f64)>,
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &self,
            _frame: &Frame,
            min_score: f64,
        ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Ok(self
                .faces
                .iter()
                .filter(|(_, score)| *score >= min_score)
                .map(|&(bbox, score)| Detection {
                    bbox,
                    score,
                    keypoints: None,
                })
                .collect())
        }
    }

    pub struct CornerLocator {
        pub calls: Arc<AtomicUsize>,
    }

    impl LandmarkLocator for CornerLocator {
        fn locate(
            &self,
            _frame: &Frame,
            detection: &Detection,
        ) -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let corner = (detection.bbox.0, detection.bbox.1);
            Ok(FaceLandmarks::new([corner; 5]))
        }
    }

    pub struct TableEmbedder {
        pub values: HashMap<i64, f32>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FaceEmbedder for TableEmbedder {
        fn embed(
            &self,
            _frame: &Frame,
            landmarks: &FaceLandmarks,
        ) -> Result<FaceEmbedding, Box<dyn std::error::Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let key = landmarks.points()[0].0.round() as i64;
            let value = self
                .values
                .get(&key)
                .copied()
                .ok_or_else(|| format!("no embedding for face at x={key}"))?;
            Ok(FaceEmbedding::new(vec![value]))
        }
    }

    /// Models that find one face per `(left, distance)` pair, each 40x40.
    pub struct StubModels {
        pub models: Arc<FaceModels>,
        pub locator_calls: Arc<AtomicUsize>,
        pub embedder_calls: Arc<AtomicUsize>,
    }

    pub fn face_bbox(left: f64) -> BBox {
        (left, 10.0, left + 40.0, 50.0)
    }

    pub fn stub_models(faces: &[(f64, f32)]) -> StubModels {
        let locator_calls = Arc::new(AtomicUsize::new(0));
        let embedder_calls = Arc::new(AtomicUsize::new(0));
        let detector = StubDetector {
            faces: faces.iter().map(|&(left, _)| (face_bbox(left), 1.0)).collect(),
        };
        let embedder = TableEmbedder {
            values: faces
                .iter()
                .map(|&(left, distance)| (left.round() as i64, distance))
                .collect(),
            calls: embedder_calls.clone(),
        };
        let models = FaceModels::new(
            Box::new(detector),
            Box::new(CornerLocator {
                calls: locator_calls.clone(),
            }),
            Box::new(embedder),
        );
        StubModels {
            models: Arc::new(models),
            locator_calls,
            embedder_calls,
        }
    }

    pub fn origin_reference() -> Vec<FaceEmbedding> {
        vec![FaceEmbedding::new(vec![0.0])]
    }
}
