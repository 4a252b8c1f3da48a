//! 5-point face landmarks: left eye, right eye, nose tip, left and right
//! mouth corners, in frame pixel coordinates.

use crate::shared::face_box::BBox;

pub const NUM_LANDMARKS: usize = 5;

/// Side length of the canonical aligned face crop.
pub const TEMPLATE_SIZE: f64 = 112.0;

/// Canonical landmark positions inside a `TEMPLATE_SIZE` square crop.
pub const ALIGNMENT_TEMPLATE: [(f64, f64); NUM_LANDMARKS] = [
    (38.2946, 51.6963),
    (73.5318, 51.5014),
    (56.0252, 71.7366),
    (41.5493, 92.3655),
    (70.7299, 92.2041),
];

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    /// Points with x <= 0 are treated as invisible.
    points: [(f64, f64); NUM_LANDMARKS],
}

impl FaceLandmarks {
    pub fn new(points: [(f64, f64); NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Places the alignment template proportionally inside `bbox`.
    ///
    /// Used when the detector gives no usable keypoints.
    pub fn estimate_from_box(bbox: BBox) -> Self {
        let (x1, y1, x2, y2) = bbox;
        let sx = (x2 - x1) / TEMPLATE_SIZE;
        let sy = (y2 - y1) / TEMPLATE_SIZE;
        let points = ALIGNMENT_TEMPLATE.map(|(tx, ty)| (x1 + tx * sx, y1 + ty * sy));
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64); NUM_LANDMARKS] {
        &self.points
    }

    pub fn is_visible(&self, i: usize) -> bool {
        self.points[i].0 > 0.0
    }

    pub fn all_visible(&self) -> bool {
        (0..NUM_LANDMARKS).all(|i| self.is_visible(i))
    }

    /// Replaces every invisible point with the matching point of `fallback`.
    pub fn completed_with(&self, fallback: &FaceLandmarks) -> FaceLandmarks {
        let mut points = self.points;
        for (i, p) in points.iter_mut().enumerate() {
            if !self.is_visible(i) {
                *p = fallback.points[i];
            }
        }
        FaceLandmarks { points }
    }
}
