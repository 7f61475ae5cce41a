use std::sync::Arc;

use parking_lot::Mutex;
use shoebox_model::{ConnectionClass, MediaItem, VideoPreload};
use tokio::runtime::Handle;

use super::image_slot::ImageSlot;
use super::policy::{PolicyTable, PreloadPolicy, PreloadSettings};
use super::resolver::{VariantResolver, usable};
use super::window::prefetch_window;
use crate::infra::cache::{
    BoundedCache, PrefetchResourceRegistry, PreloadStats, PreloadStatsSnapshot,
};
use crate::infra::media::{ImageFetcher, MediaSurface, VideoPrefetchRequest};
use crate::infra::network::ConnectionQualityProbe;

/// Prefetches images and videos around the feed position so scrolling
/// finds media already warm.
///
/// All operations are best effort: nothing here returns an error, and a
/// feed keeps working (just slower) if every prefetch fails. Loads are
/// spawned on the runtime captured at construction and are never awaited by
/// the caller.
///
/// Lock order is images, then videos, then registry.
pub struct MediaPreloader {
    images: Mutex<BoundedCache<String, Arc<ImageSlot>>>,
    videos: Mutex<BoundedCache<String, VideoPreload>>,
    registry: Mutex<PrefetchResourceRegistry>,
    probe: ConnectionQualityProbe,
    policies: PolicyTable,
    look_behind: usize,
    fetcher: Arc<dyn ImageFetcher>,
    surface: Arc<dyn MediaSurface>,
    runtime: Handle,
    stats: Arc<PreloadStats>,
}

impl std::fmt::Debug for MediaPreloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPreloader")
            .field("images", &self.images.lock().len())
            .field("videos", &self.videos.lock().len())
            .field("live_handles", &self.registry.lock().len())
            .field("probe", &self.probe)
            .field("look_behind", &self.look_behind)
            .finish_non_exhaustive()
    }
}

impl MediaPreloader {
    pub fn new(
        settings: PreloadSettings,
        probe: ConnectionQualityProbe,
        fetcher: Arc<dyn ImageFetcher>,
        surface: Arc<dyn MediaSurface>,
        runtime: Handle,
    ) -> Self {
        Self {
            images: Mutex::new(BoundedCache::new(
                settings.image_cache_capacity,
            )),
            videos: Mutex::new(BoundedCache::new(
                settings.video_cache_capacity,
            )),
            registry: Mutex::new(PrefetchResourceRegistry::new(
                settings.video_registry_max,
            )),
            probe,
            policies: settings.policies,
            look_behind: settings.look_behind,
            fetcher,
            surface,
            runtime,
            stats: Arc::new(PreloadStats::default()),
        }
    }

    pub fn connection_class(&self) -> ConnectionClass {
        self.probe.classify()
    }

    pub fn policy(&self, class: ConnectionClass) -> &PreloadPolicy {
        self.policies.for_class(class)
    }

    /// Prefetch every item in the window around `center_index`.
    ///
    /// Cheap to call on every scroll tick: variants that are already cached
    /// cost a membership check and nothing else.
    pub fn preload_around<R>(
        &self,
        items: &[MediaItem],
        center_index: usize,
        resolver: &R,
    ) where
        R: VariantResolver + ?Sized,
    {
        let class = self.probe.classify();
        let policy = *self.policies.for_class(class);
        let Some(window) = prefetch_window(
            items.len(),
            center_index,
            self.look_behind,
            policy.ahead,
        ) else {
            return;
        };

        log::trace!(
            "Preloading window {:?} around {} on {} connection",
            window,
            center_index,
            class
        );

        for item in &items[window] {
            if !item.is_prefetchable() {
                continue;
            }
            if item.is_video() {
                self.prefetch_video(item, class, &policy, resolver);
            } else if let Some(url) =
                usable(resolver.resolve(item, policy.image_width))
            {
                self.request_image(url);
            }
        }
    }

    /// Prefetch a batch of image URLs regardless of position, as grid views
    /// do.
    pub fn preload_image_urls<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            if let Some(url) = usable(Some(url.into())) {
                self.request_image(url);
            }
        }
    }

    /// True once the image at `url` is cached and finished loading with a
    /// non-zero size. Counts as an access for recency.
    pub fn is_image_cached(&self, url: &str) -> bool {
        self.images
            .lock()
            .get(url)
            .is_some_and(|slot| slot.is_ready())
    }

    /// Whether a load for `url` has been issued and is still cached, loaded
    /// or not. Does not affect recency.
    pub fn has_image(&self, url: &str) -> bool {
        self.images.lock().has(url)
    }

    /// Whether a video variant is remembered as prefetched.
    pub fn has_video(&self, url: &str) -> bool {
        self.videos.lock().has(url)
    }

    pub fn image_cache_len(&self) -> usize {
        self.images.lock().len()
    }

    pub fn video_cache_len(&self) -> usize {
        self.videos.lock().len()
    }

    /// Hidden video handles currently owned by the registry.
    pub fn live_video_handles(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn stats(&self) -> PreloadStatsSnapshot {
        self.stats.snapshot()
    }

    /// Drop every cached entry and dispose every prefetch handle.
    ///
    /// Safe at any time, e.g. on logout or a low-memory signal. In-flight
    /// image loads keep running but land in slots nothing references.
    pub fn clear(&self) {
        let mut images = self.images.lock();
        let mut videos = self.videos.lock();
        let mut registry = self.registry.lock();

        let dropped_images = images.len();
        images.clear();
        videos.clear();
        let disposed = registry.dispose_all();

        self.stats.on_video_disposed(disposed);
        self.stats.on_clear();
        log::debug!(
            "Cleared preload caches ({} images, {} video handles disposed)",
            dropped_images,
            disposed
        );
    }

    fn request_image(&self, url: String) {
        self.stats.on_image_request();

        let slot = {
            let mut images = self.images.lock();
            // A failed load does not count as cached, so a later pass over
            // the same window tries again.
            if images.peek(&url).is_some_and(|slot| !slot.is_failed()) {
                self.stats.on_image_hit();
                return;
            }

            let slot = Arc::new(ImageSlot::new(url.clone()));
            if let Some((evicted, _)) = images.set(url, Arc::clone(&slot)) {
                self.stats.on_image_evicted();
                log::trace!("Evicted prefetched image {}", evicted);
            }
            slot
        };

        self.spawn_image_load(slot);
    }

    fn spawn_image_load(&self, slot: Arc<ImageSlot>) {
        let fetcher = Arc::clone(&self.fetcher);
        let stats = Arc::clone(&self.stats);

        self.runtime.spawn(async move {
            match fetcher.fetch(slot.url()).await {
                Ok(dimensions) => {
                    slot.mark_loaded(dimensions);
                    stats.on_image_loaded();
                    log::trace!(
                        "Prefetched image {} ({}) in {:?}",
                        slot.url(),
                        dimensions,
                        slot.requested_at().elapsed()
                    );
                }
                Err(err) => {
                    slot.mark_failed();
                    stats.on_image_failed();
                    log::debug!(
                        "Image prefetch failed for {}: {}",
                        slot.url(),
                        err
                    );
                }
            }
        });
    }

    fn prefetch_video<R>(
        &self,
        item: &MediaItem,
        class: ConnectionClass,
        policy: &PreloadPolicy,
        resolver: &R,
    ) where
        R: VariantResolver + ?Sized,
    {
        let video = match policy.video {
            Some(video) if class != ConnectionClass::Slow => video,
            _ => {
                self.stats.on_video_skipped();
                return;
            }
        };

        let Some(url) =
            usable(resolver.resolve_video(item, video.max_resolution))
        else {
            return;
        };
        self.stats.on_video_request();

        let mut videos = self.videos.lock();
        if videos.has(&url) {
            self.stats.on_video_hit();
            return;
        }

        let request = VideoPrefetchRequest {
            url: url.clone(),
            preload: video.preload,
            max_resolution: video.max_resolution,
        };
        let mut handle = self.surface.create_video(&request);
        handle.attach();

        if let Some((evicted, _)) = videos.set(url.clone(), video.preload) {
            log::trace!("Video cache dropped {}", evicted);
        }
        let disposed = self.registry.lock().register(url, handle);
        self.stats.on_video_disposed(disposed);

        log::trace!(
            "Prefetching video {} at {} (preload={})",
            item.id,
            video.max_resolution,
            video.preload
        );
    }
}
