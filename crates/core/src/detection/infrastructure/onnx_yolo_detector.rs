/// YOLO face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference and NMS post-processing.
/// Scores are reported as the log-odds of the model confidence, so a
/// threshold of `0.0` keeps every face the model is more sure of than not.
use std::path::Path;
use std::sync::Mutex;

use crate::detection::domain::face_detector::{Detection, FaceDetector};
use crate::detection::domain::face_landmarks::{FaceLandmarks, NUM_LANDMARKS};
use crate::shared::frame::Frame;

use super::math::{bbox_iou, logit};
use super::onnx_session::{load_session, square_input_size};

/// Fallback YOLO model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// Keypoint values per detection (5 landmarks × 3 values each: x, y, conf).
const NUM_KEYPOINT_VALUES: usize = NUM_LANDMARKS * 3;

/// Minimum keypoint confidence to treat a landmark as visible.
const KEYPOINT_CONF_THRESH: f64 = 0.5;

/// YOLO face detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: Mutex<ort::session::Session>,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = square_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        Ok(Self {
            session: Mutex::new(session),
            input_size,
        })
    }
}

impl FaceDetector for OnnxYoloDetector {
    fn detect(
        &self,
        frame: &Frame,
        min_score: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }

        // 1. Preprocess: letterbox + normalize → NCHW float32
        let (input_tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("Lock poisoned: {e}"))?;
        let outputs = session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        // 3. Parse, filter and map back to frame coordinates
        let layout = OutputLayout::from_shape(&shape)?;
        let letterbox = LetterboxMapping {
            scale,
            pad_x: pad_x as f64,
            pad_y: pad_y as f64,
        };
        let mut raw_dets: Vec<RawDetection> = (0..layout.num_dets)
            .filter_map(|i| parse_row(&layout.row(data, i), &letterbox))
            .filter(|d| d.score >= min_score)
            .collect();

        // 4. NMS
        let kept = nms(&mut raw_dets, NMS_IOU_THRESH);

        Ok(kept.into_iter().map(RawDetection::into_detection).collect())
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to `target_size` × `target_size`.
///
/// Returns `(NCHW float32 tensor, scale, pad_x, pad_y)`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Padded with 114/255 gray, YOLO convention
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize + copy into padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// YOLO output is `[1, num_features, num_detections]` (transposed) or
/// `[1, num_detections, num_features]`.
#[derive(Debug, PartialEq)]
struct OutputLayout {
    num_dets: usize,
    num_feats: usize,
    transposed: bool,
}

impl OutputLayout {
    fn from_shape(shape: &[usize]) -> Result<Self, Box<dyn std::error::Error>> {
        if shape.len() != 3 {
            return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
        }
        let transposed = shape[1] < shape[2];
        let (num_dets, num_feats) = if transposed {
            (shape[2], shape[1])
        } else {
            (shape[1], shape[2])
        };
        Ok(Self {
            num_dets,
            num_feats,
            transposed,
        })
    }

    fn row(&self, data: &[f32], i: usize) -> Vec<f32> {
        if self.transposed {
            (0..self.num_feats)
                .filter_map(|f| data.get(f * self.num_dets + i).copied())
                .collect()
        } else {
            data.get(i * self.num_feats..(i + 1) * self.num_feats)
                .map(<[f32]>::to_vec)
                .unwrap_or_default()
        }
    }
}

struct LetterboxMapping {
    scale: f64,
    pad_x: f64,
    pad_y: f64,
}

impl LetterboxMapping {
    fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Parses `[cx, cy, w, h, conf, kp0_x, kp0_y, kp0_conf, ...]`.
fn parse_row(row: &[f32], mapping: &LetterboxMapping) -> Option<RawDetection> {
    if row.len() < 5 {
        return None;
    }
    let conf = row[4] as f64;
    let cx = row[0] as f64;
    let cy = row[1] as f64;
    let w = row[2] as f64;
    let h = row[3] as f64;

    let (x1, y1) = mapping.to_frame(cx - w / 2.0, cy - h / 2.0);
    let (x2, y2) = mapping.to_frame(cx + w / 2.0, cy + h / 2.0);

    let keypoints = (row.len() >= 5 + NUM_KEYPOINT_VALUES).then(|| {
        let mut pts = [(0.0f64, 0.0f64); NUM_LANDMARKS];
        for (k, pt) in pts.iter_mut().enumerate() {
            let base = 5 + k * 3;
            if row[base + 2] as f64 >= KEYPOINT_CONF_THRESH {
                *pt = mapping.to_frame(row[base] as f64, row[base + 1] as f64);
            }
            // else: stays (0.0, 0.0), treated as invisible by FaceLandmarks
        }
        pts
    });

    Some(RawDetection {
        x1,
        y1,
        x2,
        y2,
        score: logit(conf),
        keypoints,
    })
}

#[derive(Clone, Debug)]
struct RawDetection {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    score: f64,
    keypoints: Option<[(f64, f64); NUM_LANDMARKS]>,
}

impl RawDetection {
    fn bbox(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    fn into_detection(self) -> Detection {
        Detection {
            bbox: (self.x1, self.y1, self.x2, self.y2),
            score: self.score,
            keypoints: self.keypoints.map(FaceLandmarks::new),
        }
    }
}

/// Greedy NMS: sort by score descending, suppress overlapping boxes.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut keep = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(dets[i].clone());
        for j in (i + 1)..dets.len() {
            if !suppressed[j] && bbox_iou(&dets[i].bbox(), &dets[j].bbox()) > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
