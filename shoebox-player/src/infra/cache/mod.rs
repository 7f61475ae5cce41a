//! In-memory cache primitives for the preloader.
//!
//! Two bounded LRU maps (decoded-image handles and video sentinels) and the
//! registry that owns live prefetch video handles.

pub mod bounded;
pub mod registry;
pub mod stats;

pub use bounded::*;
pub use registry::*;
pub use stats::*;
