use serde::{Deserialize, Serialize};

///Configuration of the no-fit polygon orbiter
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    ///Maximum number of translations before an orbit is abandoned as timed out
    pub max_iterations: usize,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self { max_iterations: 75 }
    }
}

/// When no-fit polygons are computed
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Every ordered pair of shapes is computed upfront, in parallel
    Eager,
    /// Pairs are computed on first request
    Lazy,
}

///Configuration of the no-fit polygon cache
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CacheConfig {
    pub mode: CacheMode,
    ///Keep results of pairs computed on demand for later requests
    pub persist: bool,
    ///Number of worker threads used for eager population, `None` for the rayon default
    pub n_workers: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: CacheMode::Eager,
            persist: true,
            n_workers: None,
        }
    }
}

/// What to do with a polygon for which no feasible position exists
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop packing and report the failure
    Abort,
    /// Leave the polygon out of the arrangement and continue with the next one
    Skip,
}

///Configuration of the placement engine
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PackConfig {
    pub orbit: OrbitConfig,
    pub cache: CacheConfig,
    pub failure_policy: FailurePolicy,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitConfig::default(),
            cache: CacheConfig::default(),
            failure_policy: FailurePolicy::Abort,
        }
    }
}
