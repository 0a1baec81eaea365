use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::TOLERANCE;

/// Displacement between two [`Point`](crate::geometry::primitives::Point)s
#[derive(Debug, Clone, PartialEq, Copy, Serialize, Deserialize)]
pub struct Vector(pub f64, pub f64);

impl Vector {
    pub const ZERO: Vector = Vector(0.0, 0.0);

    /// z-component of the 3D cross product, positive if `other` lies counterclockwise of `self`
    pub fn cross(&self, other: Vector) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    pub fn length(&self) -> f64 {
        self.sq_length().sqrt()
    }

    pub fn sq_length(&self) -> f64 {
        self.0 * self.0 + self.1 * self.1
    }

    /// Unit vector in the same direction, `None` for (near) zero vectors
    pub fn normalize(&self) -> Option<Vector> {
        let l = self.length();
        match l < TOLERANCE {
            true => None,
            false => Some(Vector(self.0 / l, self.1 / l)),
        }
    }

    /// Vector rotated by 90 degrees counterclockwise
    pub fn left_normal(&self) -> Vector {
        Vector(-self.1, self.0)
    }

    pub fn almost_eq(&self, other: &Vector) -> bool {
        (self.0 - other.0).abs() < TOLERANCE && (self.1 - other.1).abs() < TOLERANCE
    }

    /// Angle in `[0, 2π)` to rotate `self` clockwise until it aligns with `other`
    pub fn clockwise_angle_to(&self, other: Vector) -> f64 {
        let ccw = f64::atan2(self.cross(other), self.dot(other));
        let cw = -ccw;
        if cw < 0.0 { cw + std::f64::consts::TAU } else { cw }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0, -self.1)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs, self.1 * rhs)
    }
}

impl From<(f64, f64)> for Vector {
    fn from(v: (f64, f64)) -> Self {
        Vector(v.0, v.1)
    }
}

impl From<Vector> for (f64, f64) {
    fn from(v: Vector) -> Self {
        (v.0, v.1)
    }
}
