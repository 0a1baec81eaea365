use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::TOLERANCE;
use crate::geometry::geo_traits::{DistanceTo, Translatable};
use crate::geometry::primitives::Vector;

/// Geometric primitive representing a point
#[derive(Debug, Clone, PartialEq, Copy, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    /// Both coordinates differ by less than [`TOLERANCE`].
    pub fn almost_eq(&self, other: &Point) -> bool {
        (self.0 - other.0).abs() < TOLERANCE && (self.1 - other.1).abs() < TOLERANCE
    }
}

impl DistanceTo<Point> for Point {
    fn distance_to(&self, other: &Point) -> f64 {
        self.sq_distance_to(other).sqrt()
    }

    fn sq_distance_to(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Translatable for Point {
    fn translate(&self, v: Vector) -> Self {
        *self + v
    }
}

impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let x = self.0.to_bits();
        let y = self.1.to_bits();
        x.hash(state);
        y.hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
