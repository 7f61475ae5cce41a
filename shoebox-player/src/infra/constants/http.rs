//! HTTP adapter defaults.

use std::time::Duration;

/// Request timeout for prefetch fetches.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Bytes buffered by a `preload=metadata` handle. Enough for the container
/// header of typical MP4 uploads.
pub const VIDEO_METADATA_BYTES: u64 = 256 * 1024;

/// Bytes buffered by a `preload=auto` handle before it stops on its own.
pub const VIDEO_AUTO_BYTES: u64 = 8 * 1024 * 1024;

/// How long the warm-up binary waits for prefetches before reporting.
pub const SETTLE_PERIOD: Duration = Duration::from_secs(5);
