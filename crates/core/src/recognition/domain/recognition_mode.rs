use super::face_embedding::FaceEmbedding;
use super::reference_set::ReferenceSet;

/// How detected faces are treated for a whole run. Decided once at start-up.
#[derive(Clone, Debug, PartialEq)]
pub enum RecognitionMode {
    /// Blur every detected face; no embeddings are computed.
    BlurAll,
    /// Blur every face except the closest matches to the references.
    BlurExceptTargets(ReferenceSet),
}

impl RecognitionMode {
    /// Recognition is enabled only when at least one reference embedding exists.
    pub fn from_references(embeddings: Vec<FaceEmbedding>) -> Self {
        match ReferenceSet::new(embeddings) {
            Some(set) => Self::BlurExceptTargets(set),
            None => Self::BlurAll,
        }
    }

    pub fn is_recognition_enabled(&self) -> bool {
        matches!(self, Self::BlurExceptTargets(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_references_blurs_all() {
        let mode = RecognitionMode::from_references(Vec::new());
        assert_eq!(mode, RecognitionMode::BlurAll);
        assert!(!mode.is_recognition_enabled());
    }

    #[test]
    fn test_references_enable_recognition() {
        let mode = RecognitionMode::from_references(vec![FaceEmbedding::new(vec![0.5; 4])]);
        assert!(mode.is_recognition_enabled());
        match mode {
            RecognitionMode::BlurExceptTargets(set) => assert_eq!(set.len(), 1),
            RecognitionMode::BlurAll => panic!("expected recognition mode"),
        }
    }
}
