use crate::geometry::TOLERANCE;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::geometry::primitives::{Point, SPolygon};

/// Depth at which interior samples are placed behind each edge.
const SAMPLE_DEPTH: f64 = 1e-4;

/// Point lies inside `poly` and further than [`TOLERANCE`] from its boundary.
pub fn strictly_inside(poly: &SPolygon, point: &Point) -> bool {
    poly.collides_with(point) && poly.distance_to(point) > TOLERANCE
}

/// Whether the interiors of `a` and `b` share a region of positive area.
/// Polygons that only touch along edges or at vertices do not overlap.
pub fn interiors_overlap(a: &SPolygon, b: &SPolygon) -> bool {
    if !a.bbox.collides_with(&b.bbox) {
        return false;
    }
    let (ba, bb) = (&a.bbox, &b.bbox);
    if f64::min(ba.x_max, bb.x_max) - f64::max(ba.x_min, bb.x_min) <= TOLERANCE
        || f64::min(ba.y_max, bb.y_max) - f64::max(ba.y_min, bb.y_min) <= TOLERANCE
    {
        //bounding boxes only touch
        return false;
    }

    let proper_crossing = a
        .edge_iter()
        .any(|e_a| b.edge_iter().any(|e_b| e_a.crosses_properly(&e_b)));

    proper_crossing
        || b.vertices.iter().any(|p| strictly_inside(a, p))
        || a.vertices.iter().any(|p| strictly_inside(b, p))
        || interior_samples(b).any(|p| strictly_inside(a, &p))
        || interior_samples(a).any(|p| strictly_inside(b, &p))
}

/// Smallest distance between the boundaries of `a` and `b`.
pub fn boundary_distance(a: &SPolygon, b: &SPolygon) -> f64 {
    let sq_ab = b
        .vertices
        .iter()
        .flat_map(|p| a.edge_iter().map(move |e| e.sq_distance_to(p)));
    let sq_ba = a
        .vertices
        .iter()
        .flat_map(|p| b.edge_iter().map(move |e| e.sq_distance_to(p)));

    sq_ab.chain(sq_ba).fold(f64::MAX, f64::min).sqrt()
}

/// Boundaries of `a` and `b` are within [`TOLERANCE`] of each other.
pub fn touching(a: &SPolygon, b: &SPolygon) -> bool {
    boundary_distance(a, b) <= TOLERANCE
}

/// Points just behind the midpoint of every edge, on the interior side.
/// Catches coincident and nested configurations where no vertex is strictly inside.
fn interior_samples(poly: &SPolygon) -> impl Iterator<Item = Point> + '_ {
    //vertices are counterclockwise, so the interior lies on the left of each edge
    poly.edge_iter().filter_map(|e| {
        let normal = e.vector().left_normal().normalize()?;
        let depth = f64::min(SAMPLE_DEPTH, 0.25 * e.length());
        Some(e.centroid() + normal * depth)
    })
}
