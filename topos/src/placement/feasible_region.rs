use geo::BooleanOps;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use itertools::Itertools;

use crate::geometry::TOLERANCE;
use crate::geometry::primitives::Point;
use crate::nfp::Nfp;

/// Union of no-fit polygons, possibly disconnected and with holes.
/// Its boundary holds the positions where an incoming polygon touches the arrangement.
#[derive(Clone, Debug)]
pub struct FeasibleRegion {
    pub area: MultiPolygon<f64>,
}

impl FeasibleRegion {
    pub fn union_of<'a>(nfps: impl IntoIterator<Item = &'a Nfp>) -> Self {
        let area = nfps
            .into_iter()
            .filter(|nfp| nfp.n_vertices() >= 3)
            .map(|nfp| MultiPolygon::new(vec![to_geo_polygon(nfp)]))
            .fold(MultiPolygon::new(vec![]), |acc, mp| acc.union(&mp));
        FeasibleRegion { area }
    }

    pub fn is_empty(&self) -> bool {
        self.area.0.is_empty()
    }

    /// Exterior and interior rings of every component
    pub fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.area
            .0
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors().iter()))
    }

    /// Every vertex of every ring
    pub fn vertices(&self) -> Vec<Point> {
        self.rings()
            .flat_map(|ring| {
                //rings are closed, the last coordinate repeats the first
                let n = ring.0.len().saturating_sub(1);
                ring.0[..n].iter().map(|c| Point(c.x, c.y))
            })
            .collect()
    }

    /// Points where the boundary of the region crosses the vertical line at `x`
    pub fn crossings_at_x(&self, x: f64) -> Vec<Point> {
        self.rings()
            .flat_map(|ring| ring.0.iter().tuple_windows())
            .filter_map(|(c1, c2): (&Coord<f64>, &Coord<f64>)| {
                let (x_min, x_max) = (c1.x.min(c2.x), c1.x.max(c2.x));
                if x < x_min - TOLERANCE || x > x_max + TOLERANCE || x_max - x_min < TOLERANCE {
                    //out of range or vertical, vertical edges contribute their vertices
                    return None;
                }
                let t = ((x - c1.x) / (c2.x - c1.x)).clamp(0.0, 1.0);
                Some(Point(x, c1.y + t * (c2.y - c1.y)))
            })
            .collect()
    }
}

fn to_geo_polygon(nfp: &Nfp) -> Polygon<f64> {
    let ring = nfp.vertices.iter().map(|p| (p.0, p.1)).collect_vec();
    Polygon::new(LineString::from(ring), vec![])
}
