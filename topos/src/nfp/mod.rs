mod cache;
mod intersection;
mod orbiter;
mod rules;

#[doc(inline)]
pub use cache::{CacheStats, NfpCache, ShapeEntry, ShapeKey, ShapeSignature};
#[doc(inline)]
pub use intersection::{ContactTag, Intersection, classify_intersections};
#[doc(inline)]
pub use orbiter::{OrbitOutcome, OrbitState, Orbiter};
#[doc(inline)]
pub use rules::{CONTINUATION_RULES, Continuation, candidate_vector, continuation};

use itertools::Itertools;

use crate::geometry::geo_enums::Orientation;
use crate::geometry::geo_traits::Translatable;
use crate::geometry::primitives::{Point, Rect, SPolygon, Vector};

/// No-fit polygon: closed loop traced by the reference vertex of a sliding polygon
/// while it touches, but never overlaps, a stationary polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Nfp {
    /// Loop of points, implicitly closed and free of collinear runs
    pub vertices: Vec<Point>,
}

impl Nfp {
    /// Builds the loop from a raw orbit trace: the closing point, repeated points and collinear points are dropped.
    pub fn from_trace(trace: &[Point]) -> Self {
        let mut vertices = trace.iter().copied().dedup_by(|a, b| a.almost_eq(b)).collect_vec();
        while vertices.len() > 1 && vertices[0].almost_eq(&vertices[vertices.len() - 1]) {
            vertices.pop();
        }
        Nfp {
            vertices: remove_collinear(vertices),
        }
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Absolute area enclosed by the loop
    pub fn area(&self) -> f64 {
        SPolygon::calculate_area(&self.vertices).abs()
    }

    pub fn bbox(&self) -> Option<Rect> {
        Rect::bounding(&self.vertices)
    }

    /// The positions in the loop, expressed as translations of `sliding` instead of positions of its reference vertex.
    pub fn translations_of(&self, sliding: &SPolygon) -> Vec<Vector> {
        let reference = sliding.reference_vertex();
        self.vertices.iter().map(|p| *p - reference).collect()
    }
}

impl Translatable for Nfp {
    fn translate(&self, v: Vector) -> Self {
        Nfp {
            vertices: self.vertices.iter().map(|p| *p + v).collect(),
        }
    }
}

fn remove_collinear(mut points: Vec<Point>) -> Vec<Point> {
    loop {
        let n = points.len();
        if n < 3 {
            return points;
        }
        let redundant = (0..n).find(|&i| {
            let (prev, cur, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            Orientation::of(cur - prev, next - cur) == Orientation::Parallel
        });
        match redundant {
            Some(i) => {
                points.remove(i);
            }
            None => return points,
        }
    }
}
