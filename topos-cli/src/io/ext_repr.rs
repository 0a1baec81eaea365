use serde::{Deserialize, Serialize};
use topos::placement::Borders;

/// External representation of a packing instance.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtInstance {
    /// Name of the instance
    pub name: String,
    /// Width of the strip, can be left out when it is passed on the command line
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub container_width: Option<f64>,
    /// Items to pack, in packing order
    pub items: Vec<ExtItem>,
}

/// External representation of an item to pack
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtItem {
    /// Unique identifier of the item
    pub id: u64,
    /// Shape of the item
    pub shape: ExtSPolygon,
}

/// A polygon with no holes and no self-intersections, as a list of vertices.
/// The closing vertex may be repeated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSPolygon(pub Vec<(f64, f64)>);

/// External representation of an item placed in the strip
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedItem {
    /// The id of the item in the instance
    pub item_id: u64,
    /// Translation applied to the item as it appears in the instance
    pub translation: (f64, f64),
}

/// External representation of the arrangement found for an instance
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSolution {
    pub container_width: f64,
    /// Width of the bounding box of the arrangement
    pub width: f64,
    /// Height of the bounding box of the arrangement, the objective of strip packing
    pub height: f64,
    /// Fraction of the bounding box covered by items
    pub density: f64,
    pub borders: Borders,
    pub placed_items: Vec<ExtPlacedItem>,
    /// Items for which no feasible position was found
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_items: Vec<u64>,
    /// Milliseconds since the start of the process
    pub run_time_ms: u64,
    /// Wall-clock time at which the solution was exported
    pub timestamp: String,
}
