use crate::geometry::TOLERANCE;
use crate::geometry::primitives::{Point, SPolygon};
use crate::placement::Borders;

/// Horizontal extent of a polygon on either side of its reference vertex
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceOffsets {
    /// Distance from the leftmost point to the reference vertex
    pub left: f64,
    /// Distance from the reference vertex to the rightmost point
    pub right: f64,
}

impl ReferenceOffsets {
    pub fn of(poly: &SPolygon) -> Self {
        let reference = poly.reference_vertex();
        ReferenceOffsets {
            left: reference.0 - poly.bbox.x_min,
            right: poly.bbox.x_max - reference.0,
        }
    }
}

/// Cost of placing a polygon with its reference vertex at `candidate`.
///
/// A placement which stays horizontally within `borders` costs `(x - left offset) - borders.right`,
/// which is never positive and lower the further left the polygon lands.
/// Otherwise the cost is the horizontal growth of the borders, which is always positive.
pub fn top_left_cost(candidate: Point, offsets: ReferenceOffsets, borders: &Borders) -> f64 {
    let x_min = candidate.0 - offsets.left;
    let x_max = candidate.0 + offsets.right;

    if x_min >= borders.left - TOLERANCE && x_max <= borders.right + TOLERANCE {
        x_min - borders.right
    } else {
        f64::max(borders.left - x_min, x_max - borders.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Rect;

    fn borders() -> Borders {
        Borders::from_bbox(&Rect::try_new(0.0, 0.0, 4.0, 2.0).unwrap())
    }

    fn unit_offsets() -> ReferenceOffsets {
        ReferenceOffsets {
            left: 0.0,
            right: 1.0,
        }
    }

    #[test]
    fn inside_prefers_left() {
        let left = top_left_cost(Point(0.0, 3.0), unit_offsets(), &borders());
        let right = top_left_cost(Point(3.0, 3.0), unit_offsets(), &borders());
        assert!(left < right);
        assert!(right <= 0.0);
    }

    #[test]
    fn growth_costs_more_than_any_inside_placement() {
        let inside = top_left_cost(Point(3.0, 0.0), unit_offsets(), &borders());
        let right_growth = top_left_cost(Point(3.5, 0.0), unit_offsets(), &borders());
        let left_growth = top_left_cost(Point(-2.0, 0.0), unit_offsets(), &borders());
        assert!(inside < right_growth);
        assert_eq!(right_growth, 0.5);
        assert_eq!(left_growth, 2.0);
    }

    #[test]
    fn offsets_of_triangle() {
        let triangle = SPolygon::new(vec![Point(0.0, 0.0), Point(3.0, 0.0), Point(1.0, 2.0)]).unwrap();
        let offsets = ReferenceOffsets::of(&triangle);
        assert_eq!(offsets.left, 1.0);
        assert_eq!(offsets.right, 2.0);
    }
}
