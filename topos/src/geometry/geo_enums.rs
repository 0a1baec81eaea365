use crate::geometry::PARALLEL_EPS;
use crate::geometry::primitives::Vector;

/// Turn direction from one vector to another, derived from the sign of their cross product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// `v` lies to the left of `u`
    CounterClockwise,
    /// `v` lies to the right of `u`
    Clockwise,
    Parallel,
}

impl Orientation {
    /// Orientation of `v` relative to `u`.
    /// Vectors enclosing an angle with a sine below [`PARALLEL_EPS`] are [`Orientation::Parallel`].
    pub fn of(u: Vector, v: Vector) -> Self {
        let cross = u.cross(v);
        let threshold = PARALLEL_EPS * u.length() * v.length();
        if cross > threshold {
            Orientation::CounterClockwise
        } else if cross < -threshold {
            Orientation::Clockwise
        } else {
            Orientation::Parallel
        }
    }

    /// The same relation, seen from the perspective of the other vector.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Parallel => Orientation::Parallel,
        }
    }
}
