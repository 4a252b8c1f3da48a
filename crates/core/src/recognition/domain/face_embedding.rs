/// Fixed-length identity vector for one face.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceEmbedding(Vec<f32>);

impl FaceEmbedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean norm of `self - other`.
    ///
    /// Embeddings of different lengths never match: the distance is `+inf`.
    pub fn distance(&self, other: &FaceEmbedding) -> f32 {
        if self.0.len() != other.0.len() {
            return f32::INFINITY;
        }
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = (*a as f64) - (*b as f64);
                d * d
            })
            .sum::<f64>()
            .sqrt() as f32
    }
}

impl From<Vec<f32>> for FaceEmbedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}
