//! Seams between the preloader and the host's media stack.
//!
//! The preloader never decodes or buffers media itself. Image loads go
//! through an [`ImageFetcher`]; hidden video elements are created by a
//! [`MediaSurface`] and controlled through [`PlayableHandle`].

use std::fmt;

use shoebox_model::{VideoPreload, VideoResolution};
use thiserror::Error;

/// Errors raised by fetchers and surfaces. The preloader absorbs all of
/// them; they exist for logging and for callers using the adapters directly.
#[derive(Debug, Error)]
pub enum PreloadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Cancelled")]
    Cancelled,
}

/// Result type for media seam operations
pub type Result<T> = std::result::Result<T, PreloadError>;

/// Decoded size of a fetched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Loads an image far enough to know it decodes, and reports its size.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> Result<ImageDimensions>;
}

/// Parameters for a hidden prefetch video element. Elements created from a
/// request are always muted, inline and invisible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPrefetchRequest {
    pub url: String,
    pub preload: VideoPreload,
    pub max_resolution: VideoResolution,
}

/// A live media element. Dropping the last reference does not stop it:
/// callers must `pause` and `detach` explicitly.
pub trait PlayableHandle: Send + Sync + fmt::Debug {
    /// Insert into the render tree so the runtime starts buffering.
    fn attach(&mut self);

    fn pause(&mut self);

    /// Remove from the render tree and release the source.
    fn detach(&mut self);

    fn is_paused(&self) -> bool;

    fn is_attached(&self) -> bool;

    fn dispose(&mut self) {
        self.pause();
        self.detach();
    }

    fn is_disposed(&self) -> bool {
        self.is_paused() && !self.is_attached()
    }
}

/// Factory for hidden playable handles.
pub trait MediaSurface: Send + Sync + 'static {
    fn create_video(
        &self,
        request: &VideoPrefetchRequest,
    ) -> Box<dyn PlayableHandle>;
}
