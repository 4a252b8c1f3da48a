//! Per-frame target selection.
//!
//! Faces are ranked by their distance to the closest reference. Only the
//! `cap` best-ranked faces may become targets, and each of them only if its
//! distance is below the recognition threshold. Everything else is blurred.

use std::cmp::Ordering;

use crate::shared::face_box::FaceBox;

/// A detected face with its minimum distance to the reference set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub face_box: FaceBox,
    pub distance: f32,
}

/// Final treatment of one face region in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    pub face_box: FaceBox,
    /// `None` when no distance was computed (blur-all mode).
    pub distance: Option<f32>,
    pub is_target: bool,
}

impl Assignment {
    /// A face blurred without any recognition attempt.
    pub fn blurred(face_box: FaceBox) -> Self {
        Self {
            face_box,
            distance: None,
            is_target: false,
        }
    }
}

/// Ranks `candidates` by ascending distance and marks targets.
///
/// A candidate at rank `i` is a target iff `i < cap` and
/// `distance < threshold`. Equal distances are ordered left to right, then
/// top to bottom; `NaN` distances rank last and never match. The result is
/// in rank order.
pub fn assign_targets(mut candidates: Vec<Candidate>, cap: usize, threshold: f32) -> Vec<Assignment> {
    candidates.sort_by(compare_candidates);

    candidates
        .into_iter()
        .enumerate()
        .map(|(rank, c)| Assignment {
            face_box: c.face_box,
            distance: Some(c.distance),
            is_target: rank < cap && c.distance < threshold,
        })
        .collect()
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    let by_distance = match (a.distance.is_nan(), b.distance.is_nan()) {
        (false, false) => a.distance.total_cmp(&b.distance),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    };
    by_distance
        .then(a.face_box.left.cmp(&b.face_box.left))
        .then(a.face_box.top.cmp(&b.face_box.top))
}
