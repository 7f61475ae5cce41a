use shoebox_model::{MediaItem, VideoResolution};

/// Maps an item to the URL of one of its sized variants.
///
/// Implementations must be deterministic for a given `(item, width)` so the
/// resulting URLs are stable cache keys. Returning `None` (or an empty
/// string) skips the item.
pub trait VariantResolver {
    fn resolve(&self, item: &MediaItem, width: u32) -> Option<String>;

    /// URL for a video variant no larger than `max_resolution`. Defaults to
    /// the image resolver at the resolution's nominal width.
    fn resolve_video(
        &self,
        item: &MediaItem,
        max_resolution: VideoResolution,
    ) -> Option<String> {
        self.resolve(item, max_resolution.width())
    }
}

impl<F> VariantResolver for F
where
    F: Fn(&MediaItem, u32) -> Option<String>,
{
    fn resolve(&self, item: &MediaItem, width: u32) -> Option<String> {
        self(item, width)
    }
}

/// Drop resolver results that cannot be fetched.
pub(crate) fn usable(url: Option<String>) -> Option<String> {
    url.filter(|url| !url.trim().is_empty())
}
