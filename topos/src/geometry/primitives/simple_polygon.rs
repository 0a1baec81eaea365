use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::NestError;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Shape, Translatable};
use crate::geometry::primitives::{Edge, Point, Rect, Vector};
use crate::util::FPA;

/// A Simple Polygon is a polygon that does not intersect itself and contains no holes.
/// It is a closed shape with a finite number of vertices and edges, stored in counterclockwise order.
/// [read more](https://en.wikipedia.org/wiki/Simple_polygon)
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    /// Set of points that form the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Area of its interior
    pub area: f64,
}

impl SPolygon {
    /// Create a new simple polygon from a set of points.
    /// Clockwise input is reversed, so the edges always run counterclockwise.
    pub fn new(mut points: Vec<Point>) -> Result<Self, NestError> {
        if points.len() < 3 {
            return Err(NestError::DegenerateInput(format!(
                "simple polygon must have at least 3 points: {points:?}"
            )));
        }
        if let Some((p, _)) = points
            .iter()
            .circular_tuple_windows()
            .find(|(p1, p2)| p1.almost_eq(p2))
        {
            return Err(NestError::DegenerateInput(format!(
                "simple polygon contains consecutive duplicate point {p:?}"
            )));
        }

        let signed_area = SPolygon::calculate_area(&points);
        let area = match signed_area {
            a if FPA(a) == FPA(0.0) => {
                return Err(NestError::DegenerateInput(format!(
                    "simple polygon has no area: {points:?}"
                )));
            }
            a if a < 0.0 => {
                //edges should always be ordered counterclockwise (positive area)
                points.reverse();
                -a
            }
            a => a,
        };

        let bbox = Rect::bounding(&points).ok_or_else(|| {
            NestError::DegenerateInput(format!("simple polygon has a flat bounding box: {points:?}"))
        })?;

        Ok(SPolygon {
            vertices: points,
            bbox,
            area,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    /// Edge starting at vertex `i`
    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// Topmost vertex, ties broken by the leftmost.
    /// This vertex is the one traced by the no-fit polygon.
    pub fn reference_vertex(&self) -> Point {
        self.vertex(self.reference_index())
    }

    /// Index of [`SPolygon::reference_vertex`]
    pub fn reference_index(&self) -> usize {
        let key = |i: usize| (OrderedFloat(-self.vertices[i].1), OrderedFloat(self.vertices[i].0));
        (1..self.n_vertices()).fold(0, |best, i| if key(i) < key(best) { i } else { best })
    }

    /// Lowest vertex, ties broken by the leftmost.
    pub fn lowest_vertex(&self) -> Point {
        let key = |p: &Point| (OrderedFloat(p.1), OrderedFloat(p.0));
        self.vertices
            .iter()
            .skip(1)
            .fold(self.vertex(0), |best, p| if key(p) < key(&best) { *p } else { best })
    }

    /// Vector of the edge from the first to the second vertex
    pub fn first_edge_vector(&self) -> Vector {
        self.vertex(1) - self.vertex(0)
    }

    /// Whether `other` is this polygon moved by some translation, vertex by vertex.
    pub fn equals_up_to_translation(&self, other: &SPolygon) -> bool {
        if self.n_vertices() != other.n_vertices() {
            return false;
        }
        let offset = other.vertex(0) - self.vertex(0);
        self.vertices
            .iter()
            .zip(other.vertices.iter())
            .all(|(p, q)| (*p + offset).almost_eq(q))
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area;
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = if i == self.n_vertices() - 1 { 0 } else { i + 1 };
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Translatable for SPolygon {
    fn translate(&self, v: Vector) -> Self {
        SPolygon {
            vertices: self.vertices.iter().map(|p| *p + v).collect(),
            bbox: self.bbox.translate(v),
            area: self.area,
        }
    }
}

impl CollidesWith<Point> for SPolygon {
    /// Ray casting test, points on the boundary can fall on either side
    fn collides_with(&self, point: &Point) -> bool {
        if !self.bbox.collides_with(point) {
            return false;
        }
        let Point(px, py) = *point;
        let mut inside = false;
        for Edge {
            start: Point(x1, y1),
            end: Point(x2, y2),
        } in self.edge_iter()
        {
            if (y1 > py) != (y2 > py) {
                let x_cross = x1 + (py - y1) * (x2 - x1) / (y2 - y1);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl DistanceTo<Point> for SPolygon {
    /// Distance from the point to the boundary of the polygon
    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }

    fn sq_distance_to(&self, point: &Point) -> f64 {
        self.edge_iter()
            .map(|e| e.sq_distance_to(point))
            .fold(f64::MAX, f64::min)
    }
}
