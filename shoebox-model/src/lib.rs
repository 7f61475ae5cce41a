//! Core data model definitions shared across Shoebox crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod network;
pub mod prelude;
pub mod quality;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::MediaId;
pub use media::{MediaItem, MediaKind};
pub use network::{ConnectionClass, EffectiveType};
pub use quality::{VideoPreload, VideoResolution};
