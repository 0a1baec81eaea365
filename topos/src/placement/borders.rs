use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Translatable;
use crate::geometry::primitives::{Rect, Vector};

/// Bounding box of the arrangement built so far.
/// Only ever grows while polygons are added.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Borders {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Borders {
    pub fn from_bbox(bbox: &Rect) -> Self {
        Borders {
            left: bbox.x_min,
            right: bbox.x_max,
            top: bbox.y_max,
            bottom: bbox.y_min,
        }
    }

    /// Extends the borders to include `bbox`
    pub fn update(&mut self, bbox: &Rect) {
        self.left = self.left.min(bbox.x_min);
        self.right = self.right.max(bbox.x_max);
        self.top = self.top.max(bbox.y_max);
        self.bottom = self.bottom.min(bbox.y_min);
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Width of the borders if they were extended horizontally to cover `[x_min, x_max]`
    pub fn width_if_extended(&self, x_min: f64, x_max: f64) -> f64 {
        self.right.max(x_max) - self.left.min(x_min)
    }
}

impl Translatable for Borders {
    fn translate(&self, v: Vector) -> Self {
        Borders {
            left: self.left + v.0,
            right: self.right + v.0,
            top: self.top + v.1,
            bottom: self.bottom + v.1,
        }
    }
}
