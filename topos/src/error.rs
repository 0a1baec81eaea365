use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Every failure the packing engine can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    /// Polygon rejected on construction or on entry into the engine.
    #[error("degenerate input polygon: {0}")]
    DegenerateInput(String),
    /// Orbit did not close within the configured number of iterations.
    #[error("NFP orbit did not close within {iterations} iterations")]
    NfpTimeout { iterations: usize },
    /// Sliding polygon ended up overlapping the stationary one.
    #[error("NFP orbit produced an overlapping configuration after {iterations} iterations")]
    NfpOverlap { iterations: usize },
    /// No admissible translation could be derived from the current contacts.
    #[error("NFP orbit found no feasible translation after {iterations} iterations ({cause})")]
    NfpNoFeasibleVector {
        iterations: usize,
        cause: DegenerateCause,
    },
    /// A shape signature matched more than one registered shape. Never escapes the cache.
    #[error("shape signature resolves to {0} registered shapes")]
    CacheAmbiguous(usize),
    /// No candidate position exists for the incoming polygon.
    #[error("no feasible placement for polygon {index}")]
    NoFeasiblePlacement { index: usize },
    #[error("operation cancelled")]
    Cancelled,
    #[error("invalid container width: {0}")]
    InvalidContainer(f64),
    /// Polygon is wider than the container and can never be placed.
    #[error("polygon {index} has width {width}, exceeding the container width {container_width}")]
    ExceedsContainer {
        index: usize,
        width: f64,
        container_width: f64,
    },
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Reason an orbit terminated in a degenerate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegenerateCause {
    /// None of the candidate vectors kept the polygons touching without overlap
    NoFeasibleVector,
    /// The chosen vector was trimmed to (almost) zero length
    Stuck,
    /// The interiors overlap after a translation
    Overlap,
}

impl Display for DegenerateCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateCause::NoFeasibleVector => write!(f, "no feasible vector"),
            DegenerateCause::Stuck => write!(f, "stuck"),
            DegenerateCause::Overlap => write!(f, "overlap"),
        }
    }
}
