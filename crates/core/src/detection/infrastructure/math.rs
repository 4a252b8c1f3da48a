//! Geometry helpers shared by the ONNX detection backends.

/// IoU between two bounding boxes represented as `[x1, y1, x2, y2]`.
pub fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

/// Log-odds of a probability. `0.5` maps to `0.0`; `0` and `1` map to the
/// infinities.
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// 2D similarity transform (uniform scale, rotation, translation):
///
/// ```text
/// x' = a*x - b*y + tx
/// y' = b*x + a*y + ty
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarityTransform {
    a: f64,
    b: f64,
    tx: f64,
    ty: f64,
}

impl SimilarityTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Least-squares fit mapping `src` points onto `dst` points.
    ///
    /// Returns `None` when the source points are all identical, since no
    /// scale can be recovered from them.
    pub fn estimate(src: &[(f64, f64)], dst: &[(f64, f64)]) -> Option<Self> {
        let n = src.len().min(dst.len());
        if n == 0 {
            return None;
        }
        let nf = n as f64;
        let (src, dst) = (&src[..n], &dst[..n]);

        let (sx, sy) = centroid(src, nf);
        let (dx, dy) = centroid(dst, nf);

        let mut var = 0.0;
        let mut dot = 0.0;
        let mut cross = 0.0;
        for (&(px, py), &(qx, qy)) in src.iter().zip(dst) {
            let (px, py) = (px - sx, py - sy);
            let (qx, qy) = (qx - dx, qy - dy);
            var += px * px + py * py;
            dot += px * qx + py * qy;
            cross += px * qy - py * qx;
        }
        if var <= f64::EPSILON {
            return None;
        }

        let a = dot / var;
        let b = cross / var;
        Some(Self {
            a,
            b,
            tx: dx - (a * sx - b * sy),
            ty: dy - (b * sx + a * sy),
        })
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.a * x - self.b * y + self.tx,
            self.b * x + self.a * y + self.ty,
        )
    }

    /// Inverse transform, or `None` for a degenerate (zero-scale) one.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.a + self.b * self.b;
        if det <= f64::EPSILON {
            return None;
        }
        let a = self.a / det;
        let b = -self.b / det;
        Some(Self {
            a,
            b,
            tx: -(a * self.tx - b * self.ty),
            ty: -(b * self.tx + a * self.ty),
        })
    }

    pub fn scale(&self) -> f64 {
        self.a.hypot(self.b)
    }
}

fn centroid(points: &[(f64, f64)], n: f64) -> (f64, f64) {
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
    (sx / n, sy / n)
}
