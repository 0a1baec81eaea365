use serde::{Deserialize, Serialize};

use crate::NestError;
use crate::geometry::TOLERANCE;
use crate::geometry::geo_traits::{CollidesWith, Translatable};
use crate::geometry::primitives::{Point, Vector};

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, NestError> {
        if !(x_min < x_max && y_min < y_max) {
            return Err(NestError::DegenerateInput(format!(
                "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
            )));
        }
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Smallest rectangle containing all `points`, `None` if there are fewer than two distinct coordinates per axis.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect::try_new(x_min, y_min, x_max, y_max).ok()
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x_min: f64::min(self.x_min, other.x_min),
            y_min: f64::min(self.y_min, other.y_min),
            x_max: f64::max(self.x_max, other.x_max),
            y_max: f64::max(self.y_max, other.y_max),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

impl Translatable for Rect {
    fn translate(&self, v: Vector) -> Self {
        Rect {
            x_min: self.x_min + v.0,
            y_min: self.y_min + v.1,
            x_max: self.x_max + v.0,
            y_max: self.y_max + v.1,
        }
    }
}

impl CollidesWith<Rect> for Rect {
    /// Rectangles touching within [`TOLERANCE`] count as colliding
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max) + TOLERANCE
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max) + TOLERANCE
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
