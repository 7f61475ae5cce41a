use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use shoebox_model::{ConnectionClass, VideoPreload, VideoResolution};

use crate::infra::constants::preload::{
    LOOK_BEHIND, capacity, fast, medium, slow,
};

/// How a video variant is prefetched on a given connection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPolicy {
    pub preload: VideoPreload,
    pub max_resolution: VideoResolution,
}

impl VideoPolicy {
    fn from_defaults(
        preload: Option<VideoPreload>,
        max_resolution: Option<VideoResolution>,
    ) -> Option<Self> {
        Some(Self {
            preload: preload?,
            max_resolution: max_resolution?,
        })
    }
}

/// Prefetch behaviour for one connection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadPolicy {
    /// Items after the centred one to prefetch.
    pub ahead: usize,
    /// Width requested from the resolver for still images.
    pub image_width: u32,
    /// `None` disables video prefetch for the class.
    pub video: Option<VideoPolicy>,
}

/// Policy per connection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTable {
    pub slow: PreloadPolicy,
    pub medium: PreloadPolicy,
    pub fast: PreloadPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            slow: PreloadPolicy {
                ahead: slow::AHEAD,
                image_width: slow::IMAGE_WIDTH,
                video: VideoPolicy::from_defaults(
                    slow::VIDEO_PRELOAD,
                    slow::VIDEO_MAX_RESOLUTION,
                ),
            },
            medium: PreloadPolicy {
                ahead: medium::AHEAD,
                image_width: medium::IMAGE_WIDTH,
                video: VideoPolicy::from_defaults(
                    medium::VIDEO_PRELOAD,
                    medium::VIDEO_MAX_RESOLUTION,
                ),
            },
            fast: PreloadPolicy {
                ahead: fast::AHEAD,
                image_width: fast::IMAGE_WIDTH,
                video: VideoPolicy::from_defaults(
                    fast::VIDEO_PRELOAD,
                    fast::VIDEO_MAX_RESOLUTION,
                ),
            },
        }
    }
}

impl PolicyTable {
    pub fn for_class(&self, class: ConnectionClass) -> &PreloadPolicy {
        match class {
            ConnectionClass::Slow => &self.slow,
            ConnectionClass::Medium => &self.medium,
            ConnectionClass::Fast => &self.fast,
        }
    }
}

/// Validated sizing and policy for a [`MediaPreloader`].
///
/// [`MediaPreloader`]: super::MediaPreloader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadSettings {
    pub image_cache_capacity: NonZeroUsize,
    pub video_cache_capacity: NonZeroUsize,
    pub video_registry_max: NonZeroUsize,
    pub look_behind: usize,
    pub policies: PolicyTable,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            image_cache_capacity: non_zero(capacity::IMAGE_CACHE_CAPACITY),
            video_cache_capacity: non_zero(capacity::VIDEO_CACHE_CAPACITY),
            video_registry_max: non_zero(capacity::VIDEO_REGISTRY_MAX),
            look_behind: LOOK_BEHIND,
            policies: PolicyTable::default(),
        }
    }
}

impl PreloadSettings {
    /// Settings with the given capacities and default policy.
    pub fn with_capacities(
        image_cache_capacity: NonZeroUsize,
        video_cache_capacity: NonZeroUsize,
        video_registry_max: NonZeroUsize,
    ) -> Self {
        Self {
            image_cache_capacity,
            video_cache_capacity,
            video_registry_max,
            ..Self::default()
        }
    }
}

fn non_zero(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_connection_tiers() {
        let table = PolicyTable::default();

        let fast = table.for_class(ConnectionClass::Fast);
        assert_eq!((fast.ahead, fast.image_width), (12, 1080));
        assert_eq!(
            fast.video,
            Some(VideoPolicy {
                preload: VideoPreload::Auto,
                max_resolution: VideoResolution::P720,
            })
        );

        let medium = table.for_class(ConnectionClass::Medium);
        assert_eq!((medium.ahead, medium.image_width), (6, 1080));
        assert_eq!(
            medium.video,
            Some(VideoPolicy {
                preload: VideoPreload::Metadata,
                max_resolution: VideoResolution::P480,
            })
        );

        let slow = table.for_class(ConnectionClass::Slow);
        assert_eq!((slow.ahead, slow.image_width), (3, 720));
        assert_eq!(slow.video, None);
    }
}
