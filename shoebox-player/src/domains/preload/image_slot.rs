use std::time::Instant;

use parking_lot::Mutex;

use crate::infra::media::ImageDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadState {
    Loading,
    Loaded(ImageDimensions),
    Failed,
}

/// Cached handle for one prefetched image variant.
///
/// The slot is inserted into the image cache as soon as the load is issued
/// and is completed later by the load task, which may outlive the slot's
/// membership in the cache.
#[derive(Debug)]
pub struct ImageSlot {
    url: String,
    requested_at: Instant,
    state: Mutex<ImageLoadState>,
}

impl ImageSlot {
    pub fn new(url: String) -> Self {
        Self {
            url,
            requested_at: Instant::now(),
            state: Mutex::new(ImageLoadState::Loading),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requested_at(&self) -> Instant {
        self.requested_at
    }

    pub fn state(&self) -> ImageLoadState {
        *self.state.lock()
    }

    pub fn mark_loaded(&self, dimensions: ImageDimensions) {
        *self.state.lock() = ImageLoadState::Loaded(dimensions);
    }

    pub fn mark_failed(&self) {
        *self.state.lock() = ImageLoadState::Failed;
    }

    /// Fully loaded with a non-zero size, as opposed to merely requested.
    pub fn is_ready(&self) -> bool {
        matches!(self.state(), ImageLoadState::Loaded(d) if !d.is_empty())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state(), ImageLoadState::Failed)
    }
}
