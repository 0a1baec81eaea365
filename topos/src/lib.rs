//!
//! A no-fit polygon (NFP) engine and greedy top-left placement heuristic for
//! 2D irregular strip packing problems.
//!
//! The crate is organized bottom-up:
//! * [`geometry`]: points, edges, simple polygons and the predicates used throughout
//! * [`nfp`]: the orbiting NFP tracer and a translation-invariant cache on top of it
//! * [`placement`]: the Top-Left Overlap Search (TOPOS) placement engine
//!

/// Geometric primitives and base algorithms
pub mod geometry;

/// No-fit polygon generation and caching
pub mod nfp;

/// Greedy placement of polygons into a strip of fixed width
pub mod placement;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::NestError;
#[doc(inline)]
pub use error::DegenerateCause;
