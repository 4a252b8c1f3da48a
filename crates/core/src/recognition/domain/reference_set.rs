use super::face_embedding::FaceEmbedding;

/// Non-empty, immutable collection of reference ("target") embeddings.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceSet {
    embeddings: Vec<FaceEmbedding>,
}

impl ReferenceSet {
    /// Returns `None` for an empty list.
    pub fn new(embeddings: Vec<FaceEmbedding>) -> Option<Self> {
        if embeddings.is_empty() {
            None
        } else {
            Some(Self { embeddings })
        }
    }

    /// Number of reference embeddings; also the per-frame cap on targets.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Smallest distance from `candidate` to any reference.
    pub fn min_distance(&self, candidate: &FaceEmbedding) -> f32 {
        self.embeddings
            .iter()
            .map(|r| r.distance(candidate))
            .fold(f32::INFINITY, f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn emb(values: &[f32]) -> FaceEmbedding {
        FaceEmbedding::new(values.to_vec())
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(ReferenceSet::new(Vec::new()).is_none());
    }

    #[test]
    fn test_len_counts_embeddings() {
        let set = ReferenceSet::new(vec![emb(&[0.0]), emb(&[1.0])]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_min_distance_picks_closest_reference() {
        let set = ReferenceSet::new(vec![emb(&[0.0, 0.0]), emb(&[1.0, 0.0])]).unwrap();
        assert_relative_eq!(set.min_distance(&emb(&[0.9, 0.0])), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_min_distance_with_tied_references_is_single_value() {
        let set = ReferenceSet::new(vec![emb(&[1.0, 0.0]), emb(&[-1.0, 0.0])]).unwrap();
        assert_relative_eq!(set.min_distance(&emb(&[0.0, 0.0])), 1.0);
    }
}
