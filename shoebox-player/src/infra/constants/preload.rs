//! Default prefetch policy.
//!
//! These are the compiled defaults behind `PreloadConfig`. The per-class
//! window sizes and video caps are empirical product choices and every one
//! of them can be overridden from the config file.

use shoebox_model::{VideoPreload, VideoResolution};

/// Cache sizing
pub mod capacity {
    /// Decoded-image handles kept warm for scroll-back.
    pub const IMAGE_CACHE_CAPACITY: usize = 200;

    /// Video variants remembered as prefetched.
    pub const VIDEO_CACHE_CAPACITY: usize = 8;

    /// Live hidden video elements allowed at once. Expected to match
    /// `VIDEO_CACHE_CAPACITY`.
    pub const VIDEO_REGISTRY_MAX: usize = 8;
}

/// Items behind the centred item that are kept prefetched.
pub const LOOK_BEHIND: usize = 2;

pub mod fast {
    use super::*;

    pub const AHEAD: usize = 12;
    pub const IMAGE_WIDTH: u32 = 1080;
    pub const VIDEO_PRELOAD: Option<VideoPreload> = Some(VideoPreload::Auto);
    pub const VIDEO_MAX_RESOLUTION: Option<VideoResolution> =
        Some(VideoResolution::P720);
}

pub mod medium {
    use super::*;

    pub const AHEAD: usize = 6;
    pub const IMAGE_WIDTH: u32 = 1080;
    pub const VIDEO_PRELOAD: Option<VideoPreload> =
        Some(VideoPreload::Metadata);
    pub const VIDEO_MAX_RESOLUTION: Option<VideoResolution> =
        Some(VideoResolution::P480);
}

pub mod slow {
    use super::*;

    pub const AHEAD: usize = 3;
    pub const IMAGE_WIDTH: u32 = 720;
    /// Videos are never prefetched on slow links.
    pub const VIDEO_PRELOAD: Option<VideoPreload> = None;
    pub const VIDEO_MAX_RESOLUTION: Option<VideoResolution> = None;
}
