/// ArcFace identity embedder using ONNX Runtime.
///
/// Faces are aligned to the canonical 112x112 template from their five
/// landmarks before inference. Outputs are L2-normalised and then scaled
/// to length `EMBEDDING_SCALE`, so Euclidean distances between embeddings
/// lie in `[0, 2 * EMBEDDING_SCALE]` and cosine similarity 0.4 lands on
/// the default recognition threshold.
use std::path::Path;
use std::sync::Mutex;

use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::detection::domain::face_landmarks::{FaceLandmarks, ALIGNMENT_TEMPLATE};
use crate::recognition::domain::face_embedding::FaceEmbedding;
use crate::shared::constants::EMBEDDING_SCALE;
use crate::shared::frame::Frame;

use super::math::SimilarityTransform;
use super::onnx_session::load_session;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

pub struct OnnxArcFaceEmbedder {
    session: Mutex<ort::session::Session>,
}

impl OnnxArcFaceEmbedder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: Mutex::new(load_session(model_path)?),
        })
    }
}

impl FaceEmbedder for OnnxArcFaceEmbedder {
    fn embed(
        &self,
        frame: &Frame,
        landmarks: &FaceLandmarks,
    ) -> Result<FaceEmbedding, Box<dyn std::error::Error>> {
        let aligned = align_face(frame, landmarks).ok_or("Degenerate face landmarks")?;
        let tensor = preprocess(&aligned);
        let input_value = ort::value::Tensor::from_array(tensor)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("Lock poisoned: {e}"))?;
        let outputs = session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        Ok(to_match_space(embedding_slice.to_vec()))
    }
}

/// Warp the face onto the 112x112 alignment template.
///
/// Returns packed RGB bytes, or `None` if no transform can be estimated
/// from the landmarks. Samples falling outside the frame are black.
fn align_face(frame: &Frame, landmarks: &FaceLandmarks) -> Option<Vec<u8>> {
    let to_template = SimilarityTransform::estimate(landmarks.points(), &ALIGNMENT_TEMPLATE)?;
    let to_frame = to_template.inverse()?;

    let mut out = vec![0u8; INPUT_SIZE * INPUT_SIZE * 3];
    for y in 0..INPUT_SIZE {
        for x in 0..INPUT_SIZE {
            let (sx, sy) = to_frame.apply((x as f64, y as f64));
            let offset = (y * INPUT_SIZE + x) * 3;
            out[offset..offset + 3].copy_from_slice(&sample_bilinear(frame, sx, sy));
        }
    }
    Some(out)
}

fn sample_bilinear(frame: &Frame, x: f64, y: f64) -> [u8; 3] {
    let w = frame.width() as i64;
    let h = frame.height() as i64;
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;
    let data = frame.data();
    let channels = frame.channels() as usize;

    let texel = |px: i64, py: i64, c: usize| -> f32 {
        if px < 0 || py < 0 || px >= w || py >= h {
            return 0.0;
        }
        data[frame.offset(px as usize, py as usize) + c] as f32
    };

    let mut rgb = [0u8; 3];
    for (c, out) in rgb.iter_mut().enumerate().take(channels.min(3)) {
        let top = texel(x0, y0, c) * (1.0 - fx) + texel(x0 + 1, y0, c) * fx;
        let bottom = texel(x0, y0 + 1, c) * (1.0 - fx) + texel(x0 + 1, y0 + 1, c) * fx;
        *out = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    rgb
}

/// Normalize an aligned RGB crop to `[-1, 1]`, NCHW layout.
fn preprocess(aligned: &[u8]) -> ndarray::Array4<f32> {
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));
    for y in 0..INPUT_SIZE {
        for x in 0..INPUT_SIZE {
            let offset = (y * INPUT_SIZE + x) * 3;
            for c in 0..3 {
                tensor[[0, c, y, x]] = (aligned[offset + c] as f32 - NORM_MEAN) / NORM_STD;
            }
        }
    }
    tensor
}

/// Raw model output to a comparable embedding.
pub fn to_match_space(mut raw: Vec<f32>) -> FaceEmbedding {
    l2_normalize(&mut raw);
    for x in raw.iter_mut() {
        *x *= EMBEDDING_SCALE;
    }
    FaceEmbedding::new(raw)
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_landmarks::TEMPLATE_SIZE;
    use crate::recognition::domain::reference_set::ReferenceSet;
    use crate::recognition::domain::target_assignment::{assign_targets, Candidate};
    use crate::shared::constants::DEFAULT_RECOGNITION_THRESHOLD;
    use crate::shared::face_box::FaceBox;
    use approx::assert_relative_eq;
    use rstest::rstest;

    /// A raw 512-d output and another whose direction has the given cosine
    /// similarity to it, with unrelated magnitudes.
    fn outputs_at_cosine(cosine: f32) -> (Vec<f32>, Vec<f32>) {
        let mut a = vec![0.0; 512];
        a[0] = 7.0;
        let mut b = vec![0.0; 512];
        b[0] = 3.0 * cosine;
        b[1] = 3.0 * (1.0 - cosine * cosine).sqrt();
        (a, b)
    }

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 77]);
            }
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_l2_normalize_unit_vector() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_match_space_has_fixed_length() {
        let embedding = to_match_space(vec![30.0, 40.0]);
        let norm = embedding.values().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert_relative_eq!(norm, EMBEDDING_SCALE, epsilon = 1e-6);
    }

    #[test]
    fn test_cosine_point_four_sits_on_default_threshold() {
        let (a, b) = outputs_at_cosine(0.4);
        let distance = to_match_space(a).distance(&to_match_space(b));
        assert_relative_eq!(distance, DEFAULT_RECOGNITION_THRESHOLD, epsilon = 1e-3);
    }

    #[test]
    fn test_opposite_faces_are_at_most_twice_the_scale_apart() {
        let distance = to_match_space(vec![1.0, 0.0]).distance(&to_match_space(vec![-5.0, 0.0]));
        assert_relative_eq!(distance, 2.0 * EMBEDDING_SCALE, epsilon = 1e-5);
    }

    #[rstest]
    #[case::same_person_other_photo(0.6, true)]
    #[case::same_person_close_up(0.85, true)]
    #[case::lookalike(0.35, false)]
    #[case::stranger(0.1, false)]
    fn test_default_threshold_spares_cosine_above_point_four(
        #[case] cosine: f32,
        #[case] spared: bool,
    ) {
        let (reference, face) = outputs_at_cosine(cosine);
        let references = ReferenceSet::new(vec![to_match_space(reference)]).unwrap();
        let candidate = Candidate {
            face_box: FaceBox::new(0, 0, 40, 40),
            distance: references.min_distance(&to_match_space(face)),
        };

        let assignments = assign_targets(
            vec![candidate],
            references.len(),
            DEFAULT_RECOGNITION_THRESHOLD,
        );
        assert_eq!(assignments[0].is_target, spared);
    }

    #[test]
    fn test_align_template_sized_face_is_a_copy() {
        // Landmarks already at template positions: alignment is the identity.
        let frame = gradient_frame(112, 112);
        let landmarks =
            FaceLandmarks::estimate_from_box((0.0, 0.0, TEMPLATE_SIZE, TEMPLATE_SIZE));
        let aligned = align_face(&frame, &landmarks).unwrap();
        assert_eq!(aligned.len(), INPUT_SIZE * INPUT_SIZE * 3);
        assert_eq!(&aligned[..], frame.data());
    }

    #[test]
    fn test_align_shifted_face_undoes_translation() {
        let frame = gradient_frame(200, 200);
        let landmarks =
            FaceLandmarks::estimate_from_box((40.0, 30.0, 40.0 + TEMPLATE_SIZE, 30.0 + TEMPLATE_SIZE));
        let aligned = align_face(&frame, &landmarks).unwrap();
        // Output pixel (0, 0) samples frame pixel (40, 30).
        assert_eq!(&aligned[..3], &[40, 30, 77]);
    }

    #[test]
    fn test_align_outside_frame_is_black() {
        let frame = Frame::filled(50, 50, [200, 200, 200], 0);
        let landmarks = FaceLandmarks::estimate_from_box((500.0, 500.0, 612.0, 612.0));
        let aligned = align_face(&frame, &landmarks).unwrap();
        assert!(aligned.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_align_degenerate_landmarks() {
        let frame = Frame::filled(50, 50, [0, 0, 0], 0);
        let landmarks = FaceLandmarks::new([(10.0, 10.0); 5]);
        assert!(align_face(&frame, &landmarks).is_none());
    }

    #[test]
    fn test_sample_bilinear_interpolates() {
        let frame = Frame::new(vec![0, 0, 0, 100, 100, 100], 2, 1, 3, 0);
        assert_eq!(sample_bilinear(&frame, 0.5, 0.0), [50, 50, 50]);
    }

    #[test]
    fn test_preprocess_shape_and_range() {
        let mut aligned = vec![0u8; INPUT_SIZE * INPUT_SIZE * 3];
        aligned[0] = 255;
        let tensor = preprocess(&aligned);
        assert_eq!(tensor.shape(), &[1, 3, 112, 112]);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!((tensor[[0, 1, 0, 0]] + 1.0).abs() < 1e-6);
    }
}
