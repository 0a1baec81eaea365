mod borders;
mod cost;
mod engine;
mod feasible_region;

#[doc(inline)]
pub use borders::Borders;
#[doc(inline)]
pub use cost::{ReferenceOffsets, top_left_cost};
#[doc(inline)]
pub use engine::{Arrangement, PlacedPolygon, PlacementEngine, pack, pack_with_cancel_flag};
#[doc(inline)]
pub use feasible_region::FeasibleRegion;
