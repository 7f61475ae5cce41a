//! Shared fixtures for preloader integration tests.

#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;

use shoebox_model::{EffectiveType, MediaId, MediaItem};
use shoebox_player::domains::preload::{MediaPreloader, PreloadSettings};
use shoebox_player::infra::network::{
    ConnectionQualityProbe, NetworkSnapshot, SharedNetworkSignals,
};
use shoebox_player::infra::testing::{FakeImageFetcher, FakeSurface};

pub struct Harness {
    pub preloader: MediaPreloader,
    pub fetcher: Arc<FakeImageFetcher>,
    pub surface: Arc<FakeSurface>,
    pub signals: SharedNetworkSignals,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(PreloadSettings::default(), FakeImageFetcher::default())
    }

    pub fn with_capacities(images: usize, videos: usize) -> Self {
        Self::build(
            PreloadSettings::with_capacities(
                nz(images),
                nz(videos),
                nz(videos),
            ),
            FakeImageFetcher::default(),
        )
    }

    pub fn with_fetcher(fetcher: FakeImageFetcher) -> Self {
        Self::build(PreloadSettings::default(), fetcher)
    }

    pub fn build(settings: PreloadSettings, fetcher: FakeImageFetcher) -> Self {
        let fetcher = Arc::new(fetcher);
        let surface = Arc::new(FakeSurface::default());
        let signals = SharedNetworkSignals::default();
        let preloader = MediaPreloader::new(
            settings,
            ConnectionQualityProbe::new(Arc::new(signals.clone())),
            fetcher.clone(),
            surface.clone(),
            tokio::runtime::Handle::current(),
        );
        Self {
            preloader,
            fetcher,
            surface,
            signals,
        }
    }

    pub fn on(self, effective_type: EffectiveType) -> Self {
        self.signals
            .update(NetworkSnapshot::with_effective_type(effective_type));
        self
    }
}

pub fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}

pub fn id(raw: &str) -> MediaId {
    MediaId::new(raw).unwrap()
}

/// `p0..pN` photos with base URLs `https://cdn.test/p{i}`.
pub fn photos(count: usize) -> Vec<MediaItem> {
    (0..count)
        .map(|i| {
            MediaItem::photo(id(&format!("p{i}")), format!("https://cdn.test/p{i}"))
        })
        .collect()
}

pub fn videos(count: usize) -> Vec<MediaItem> {
    (0..count)
        .map(|i| {
            MediaItem::video(id(&format!("v{i}")), format!("https://cdn.test/v{i}"))
        })
        .collect()
}

/// Width-suffixed variant of a base URL.
pub fn resolve(item: &MediaItem, width: u32) -> Option<String> {
    item.base_reference().map(|base| format!("{base}@{width}"))
}

pub fn variant(base: &str, width: u32) -> String {
    format!("https://cdn.test/{base}@{width}")
}
