use crate::NestError;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Translatable};
use crate::geometry::primitives::{Point, Vector};
use crate::geometry::{PARALLEL_EPS, TOLERANCE};

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Result<Self, NestError> {
        if start.almost_eq(&end) {
            return Err(NestError::DegenerateInput(format!(
                "degenerate edge, {start:?} == {end:?}"
            )));
        }
        Ok(Edge { start, end })
    }

    pub fn vector(&self) -> Vector {
        self.end - self.start
    }

    pub fn reverse(mut self) -> Self {
        std::mem::swap(&mut self.start, &mut self.end);
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    /// Returns the closest point which lies on the edge to the given point
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        let d = self.vector();
        let len_sq = d.sq_length();
        let param = match len_sq > 0.0 {
            true => (*point - self.start).dot(d) / len_sq,
            false => 0.0,
        };
        match param {
            p if p < 0.0 => self.start,
            p if p > 1.0 => self.end,
            p => self.start + d * p,
        }
    }

    /// Signed distance from `point` to the supporting line of the edge, positive on the left side.
    pub fn signed_distance(&self, point: &Point) -> f64 {
        let d = self.vector();
        d.cross(*point - self.start) / d.length()
    }

    /// Point where two non-parallel edges cross or touch, within [`TOLERANCE`].
    /// Parallel and collinear pairs never produce a point.
    /// The point is snapped onto an endpoint of either edge when it lies within tolerance of it.
    pub fn intersection(&self, other: &Edge) -> Option<Point> {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max()) + TOLERANCE
            || f64::max(self.y_min(), other.y_min())
                > f64::min(self.y_max(), other.y_max()) + TOLERANCE
        {
            //bounding boxes do not overlap
            return None;
        }

        let (r, s) = (self.vector(), other.vector());
        let (r_len, s_len) = (r.length(), s.length());
        let denom = r.cross(s);
        if denom.abs() <= PARALLEL_EPS * r_len * s_len {
            return None;
        }
        let w = other.start - self.start;
        let t = w.cross(s) / denom;
        let u = w.cross(r) / denom;

        let within = |param: f64, len: f64| {
            let d = param * len;
            d >= -TOLERANCE && d <= len + TOLERANCE
        };
        if !within(t, r_len) || !within(u, s_len) {
            return None;
        }

        let point = self.start + r * t;
        let snapped = [self.start, self.end, other.start, other.end]
            .into_iter()
            .find(|p| p.almost_eq(&point))
            .unwrap_or(point);
        Some(snapped)
    }

    /// Distance along a ray, starting at `origin` in unit direction `dir`, at which it meets this edge.
    /// Rays parallel to the edge never hit it. The returned distance can be negative (hit behind the origin).
    pub fn ray_hit(&self, origin: Point, dir: Vector) -> Option<f64> {
        let e = self.vector();
        let e_len = e.length();
        let denom = dir.cross(e);
        if denom.abs() <= PARALLEL_EPS * e_len {
            return None;
        }
        let w = self.start - origin;
        let s = w.cross(e) / denom;
        let u = w.cross(dir) / denom;
        let tol_u = TOLERANCE / e_len;
        match u >= -tol_u && u <= 1.0 + tol_u {
            true => Some(s),
            false => None,
        }
    }

    /// Both edges cross each other at a point interior to both, with every endpoint
    /// clearly (more than [`TOLERANCE`]) separated from the other edge's supporting line.
    pub fn crosses_properly(&self, other: &Edge) -> bool {
        let d1 = self.signed_distance(&other.start);
        let d2 = self.signed_distance(&other.end);
        let d3 = other.signed_distance(&self.start);
        let d4 = other.signed_distance(&self.end);

        d1 * d2 < 0.0
            && d3 * d4 < 0.0
            && [d1, d2, d3, d4].iter().all(|d| d.abs() > TOLERANCE)
    }
}

impl Translatable for Edge {
    fn translate(&self, v: Vector) -> Self {
        Edge {
            start: self.start + v,
            end: self.end + v,
        }
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        f64::sqrt(self.sq_distance_to(point))
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        point.sq_distance_to(&self.closest_point_on_edge(point))
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        self.intersection(other).is_some()
    }
}
