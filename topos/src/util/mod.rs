/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod config;
mod fpa;

#[doc(inline)]
pub use config::CacheConfig;
#[doc(inline)]
pub use config::CacheMode;
#[doc(inline)]
pub use config::FailurePolicy;
#[doc(inline)]
pub use config::OrbitConfig;
#[doc(inline)]
pub use config::PackConfig;
#[doc(inline)]
pub use fpa::FPA;
