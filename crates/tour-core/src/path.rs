//! Path geometry boundary.
//!
//! The core never mutates the path; it only asks for its length, for points
//! at a normalized parameter and for nearest-point projections. Hosts that
//! already own a spline implementation plug it in through [`PathProvider`];
//! [`PolylinePath`] covers tests and the native driver.

use glam::Vec3;

/// Read-only queries against the fixed 3-D curve the observer travels on.
///
/// `t` is the normalized arc-length parameter in `[0, 1]`.
pub trait PathProvider {
    fn length(&self) -> f32;
    fn position_at(&self, t: f32) -> Vec3;
    fn tangent_at(&self, t: f32) -> Vec3;
    /// Closest point on the path to `p` and its parameter `t`.
    fn nearest_point(&self, p: Vec3) -> (Vec3, f32);
}

/// Track distance of the path point closest to `point`.
///
/// Used to anchor zones to scene objects: an object placed next to the path
/// triggers where the observer passes closest to it.
pub fn anchor_distance(path: &dyn PathProvider, point: Vec3) -> f32 {
    let (_, t) = path.nearest_point(point);
    path.length() * t
}

/// Piecewise-linear path through a list of points, parameterized by arc length.
#[derive(Clone, Debug)]
pub struct PolylinePath {
    points: Vec<Vec3>,
    // cumulative[i] = arc length from points[0] to points[i]
    cumulative: Vec<f32>,
    length: f32,
}

impl PolylinePath {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0_f32;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                acc += p.distance(points[i - 1]);
            }
            cumulative.push(acc);
        }
        if points.len() < 2 {
            log::warn!("[path] polyline with {} point(s) has zero length", points.len());
        }
        Self {
            points,
            cumulative,
            length: acc,
        }
    }

    /// Straight segment from `a` to `b`.
    pub fn line(a: Vec3, b: Vec3) -> Self {
        Self::new(vec![a, b])
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    // Segment index containing arc length `s` and the local fraction along it.
    fn locate(&self, s: f32) -> (usize, f32) {
        let last_seg = self.points.len().saturating_sub(2);
        let idx = self
            .cumulative
            .partition_point(|&c| c <= s)
            .saturating_sub(1)
            .min(last_seg);
        let seg_len = self.cumulative[idx + 1] - self.cumulative[idx];
        let local = if seg_len > 0.0 {
            ((s - self.cumulative[idx]) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (idx, local)
    }
}

impl PathProvider for PolylinePath {
    fn length(&self) -> f32 {
        self.length
    }

    fn position_at(&self, t: f32) -> Vec3 {
        match self.points.len() {
            0 => Vec3::ZERO,
            1 => self.points[0],
            _ => {
                let (i, local) = self.locate(t.clamp(0.0, 1.0) * self.length);
                self.points[i].lerp(self.points[i + 1], local)
            }
        }
    }

    fn tangent_at(&self, t: f32) -> Vec3 {
        if self.points.len() < 2 {
            return Vec3::ZERO;
        }
        let (i, _) = self.locate(t.clamp(0.0, 1.0) * self.length);
        (self.points[i + 1] - self.points[i]).normalize_or_zero()
    }

    fn nearest_point(&self, p: Vec3) -> (Vec3, f32) {
        match self.points.len() {
            0 => return (Vec3::ZERO, 0.0),
            1 => return (self.points[0], 0.0),
            _ => {}
        }
        let mut best = (self.points[0], 0.0_f32, f32::MAX);
        for i in 0..self.points.len() - 1 {
            let a = self.points[i];
            let ab = self.points[i + 1] - a;
            let len_sq = ab.length_squared();
            let local = if len_sq > 0.0 {
                ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let q = a + ab * local;
            let d_sq = q.distance_squared(p);
            if d_sq < best.2 {
                let s = self.cumulative[i] + local * (self.cumulative[i + 1] - self.cumulative[i]);
                best = (q, s, d_sq);
            }
        }
        let t = if self.length > 0.0 {
            best.1 / self.length
        } else {
            0.0
        };
        (best.0, t)
    }
}
