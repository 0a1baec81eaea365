use itertools::Itertools;
use log::error;

use crate::geometry::TOLERANCE;
use crate::geometry::overlap::interiors_overlap;
use crate::placement::{Borders, PlacedPolygon};
use crate::util::FPA;
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// No two placed polygons overlap and all of them lie within `borders`
pub fn arrangement_is_valid(placed: &[PlacedPolygon], borders: &Borders) -> bool {
    placed_within_borders(placed, borders) && no_overlaps(placed)
}

pub fn placed_within_borders(placed: &[PlacedPolygon], borders: &Borders) -> bool {
    placed.iter().all(|pp| {
        let bbox = &pp.shape.bbox;
        let inside = bbox.x_min >= borders.left - TOLERANCE
            && bbox.x_max <= borders.right + TOLERANCE
            && bbox.y_min >= borders.bottom - TOLERANCE
            && bbox.y_max <= borders.top + TOLERANCE;
        if !inside {
            error!("polygon {} ({:?}) exceeds borders {:?}", pp.index, bbox, borders);
        }
        inside
    })
}

pub fn no_overlaps(placed: &[PlacedPolygon]) -> bool {
    placed.iter().tuple_combinations().all(|(a, b)| {
        let overlap = interiors_overlap(&a.shape, &b.shape);
        if overlap {
            error!("polygons {} and {} overlap", a.index, b.index);
        }
        !overlap
    })
}

/// Bottom-left corner of the borders lies in the origin
pub fn compacted(borders: &Borders) -> bool {
    FPA(borders.left) == FPA(0.0) && FPA(borders.bottom) == FPA(0.0)
}
