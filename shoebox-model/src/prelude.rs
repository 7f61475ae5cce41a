//! Player focused snapshot of the model surface.
//! Prefer importing from this module when working in shoebox-player.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::MediaId;
pub use super::media::{MediaItem, MediaKind};
pub use super::network::{ConnectionClass, EffectiveType};
pub use super::quality::{VideoPreload, VideoResolution};
