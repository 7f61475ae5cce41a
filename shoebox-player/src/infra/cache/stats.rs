use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadStatsSnapshot {
    pub image_requests: u64,
    pub image_hits: u64,
    pub image_loaded: u64,
    pub image_failed: u64,
    pub image_evictions: u64,
    pub video_requests: u64,
    pub video_hits: u64,
    pub video_skipped: u64,
    pub video_disposed: u64,
    pub clears: u64,
}

#[derive(Debug, Default)]
pub struct PreloadStats {
    image_requests: AtomicU64,
    image_hits: AtomicU64,
    image_loaded: AtomicU64,
    image_failed: AtomicU64,
    image_evictions: AtomicU64,
    video_requests: AtomicU64,
    video_hits: AtomicU64,
    video_skipped: AtomicU64,
    video_disposed: AtomicU64,
    clears: AtomicU64,
}

impl PreloadStats {
    pub fn on_image_request(&self) {
        self.image_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_image_hit(&self) {
        self.image_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_image_loaded(&self) {
        self.image_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_image_failed(&self) {
        self.image_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_image_evicted(&self) {
        self.image_evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_video_request(&self) {
        self.video_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_video_hit(&self) {
        self.video_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_video_skipped(&self) {
        self.video_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_video_disposed(&self, count: usize) {
        self.video_disposed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn on_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PreloadStatsSnapshot {
        PreloadStatsSnapshot {
            image_requests: self.image_requests.load(Ordering::Relaxed),
            image_hits: self.image_hits.load(Ordering::Relaxed),
            image_loaded: self.image_loaded.load(Ordering::Relaxed),
            image_failed: self.image_failed.load(Ordering::Relaxed),
            image_evictions: self.image_evictions.load(Ordering::Relaxed),
            video_requests: self.video_requests.load(Ordering::Relaxed),
            video_hits: self.video_hits.load(Ordering::Relaxed),
            video_skipped: self.video_skipped.load(Ordering::Relaxed),
            video_disposed: self.video_disposed.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}
