use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::detection::domain::face_models::FaceModels;
use crate::recognition::domain::face_embedding::FaceEmbedding;
use crate::shared::constants::DEFAULT_DETECTION_THRESHOLD;
use crate::video::domain::image_reader::ImageReader;

use super::frame_classifier::describe;
use super::pipeline_error::{AdapterError, PipelineError};

/// Computes reference embeddings from target images.
///
/// Every face found in every image contributes one embedding; an image
/// with no face contributes nothing. Detection always runs at the default
/// threshold so that `-d` only affects the video.
pub struct BuildReferenceSetUseCase {
    models: Arc<FaceModels>,
    reader: Box<dyn ImageReader>,
}

impl BuildReferenceSetUseCase {
    pub fn new(models: Arc<FaceModels>, reader: Box<dyn ImageReader>) -> Self {
        Self { models, reader }
    }

    pub fn execute(&self, paths: &[PathBuf]) -> Result<Vec<FaceEmbedding>, PipelineError> {
        let mut embeddings = Vec::new();
        for path in paths {
            let found = self.embed_image(path)?;
            log::info!("{}: {} face(s)", path.display(), found.len());
            embeddings.extend(found);
        }

        if !paths.is_empty() && embeddings.is_empty() {
            log::warn!(
                "No face found in any of the {} target image(s); every face will be blurred",
                paths.len()
            );
        }
        Ok(embeddings)
    }

    fn embed_image(&self, path: &Path) -> Result<Vec<FaceEmbedding>, PipelineError> {
        let image = self
            .reader
            .read(path)
            .map_err(|source| PipelineError::TargetImage {
                path: path.to_path_buf(),
                source,
            })?;

        let embedding_error = |source: AdapterError| PipelineError::ReferenceEmbedding {
            path: path.to_path_buf(),
            source,
        };

        let detections = self
            .models
            .detector
            .detect(&image, DEFAULT_DETECTION_THRESHOLD)
            .map_err(embedding_error)?;

        detections
            .iter()
            .map(|detection| {
                describe(&self.models, &image, detection)
                    .map(|face| face.embedding)
                    .map_err(embedding_error)
            })
            .collect()
    }
}
