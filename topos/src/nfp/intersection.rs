use crate::geometry::geo_enums::Orientation;
use crate::geometry::primitives::{Edge, Point, SPolygon, Vector};

/// Where on an edge an intersection point lies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactTag {
    Start,
    End,
    Interior,
}

impl ContactTag {
    fn of(edge: &Edge, point: &Point) -> Self {
        if edge.start.almost_eq(point) {
            ContactTag::Start
        } else if edge.end.almost_eq(point) {
            ContactTag::End
        } else {
            ContactTag::Interior
        }
    }
}

/// Contact between an edge of the stationary polygon and an edge of the sliding polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub stationary_edge: Edge,
    pub sliding_edge: Edge,
    pub point: Point,
    pub stationary_tag: ContactTag,
    pub sliding_tag: ContactTag,
}

impl Intersection {
    pub fn stationary_vector(&self) -> Vector {
        self.stationary_edge.vector()
    }

    pub fn sliding_vector(&self) -> Vector {
        self.sliding_edge.vector()
    }

    pub fn stationary_starts(&self) -> bool {
        self.stationary_tag == ContactTag::Start
    }

    pub fn stationary_ends(&self) -> bool {
        self.stationary_tag == ContactTag::End
    }

    pub fn sliding_starts(&self) -> bool {
        self.sliding_tag == ContactTag::Start
    }

    pub fn sliding_ends(&self) -> bool {
        self.sliding_tag == ContactTag::End
    }

    /// Orientation of the sliding edge relative to the stationary edge
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.stationary_vector(), self.sliding_vector())
    }
}

/// All contacts between the edges of `stationary` and `sliding`.
/// Parallel edge pairs, including overlapping collinear ones, produce no record.
pub fn classify_intersections(stationary: &SPolygon, sliding: &SPolygon) -> Vec<Intersection> {
    let mut intersections = vec![];
    for stationary_edge in stationary.edge_iter() {
        for sliding_edge in sliding.edge_iter() {
            if let Some(point) = stationary_edge.intersection(&sliding_edge) {
                intersections.push(Intersection {
                    stationary_edge,
                    sliding_edge,
                    point,
                    stationary_tag: ContactTag::of(&stationary_edge, &point),
                    sliding_tag: ContactTag::of(&sliding_edge, &point),
                });
            }
        }
    }
    intersections
}
