//! MediaPreloader behaviour against fake fetchers and surfaces.
//!
//! Covers the prefetch window, connection-dependent policy, registry and
//! cache agreement, clearing, and load-state reporting.

mod common;

use common::{Harness, id, photos, resolve, variant, videos};
use shoebox_model::{
    ConnectionClass, EffectiveType, MediaItem, VideoPreload, VideoResolution,
};
use shoebox_player::infra::media::ImageDimensions;
use shoebox_player::infra::testing::{FakeImageFetcher, FetchOutcome, settle};

#[tokio::test]
async fn fast_window_covers_two_behind_through_end_of_feed() {
    let h = Harness::new();
    let items = photos(10);

    h.preloader.preload_around(&items, 5, &resolve);
    settle().await;

    for i in 0..10 {
        let url = variant(&format!("p{i}"), 1080);
        assert_eq!(h.preloader.has_image(&url), (3..=9).contains(&i), "p{i}");
    }
    assert_eq!(h.fetcher.requested().len(), 7);
    assert_eq!(h.preloader.image_cache_len(), 7);
}

#[tokio::test]
async fn out_of_range_center_and_empty_feed_do_nothing() {
    let h = Harness::new();

    h.preloader.preload_around(&[], 0, &resolve);
    h.preloader.preload_around(&photos(3), 3, &resolve);
    settle().await;

    assert_eq!(h.preloader.image_cache_len(), 0);
    assert!(h.fetcher.requested().is_empty());
}

#[tokio::test]
async fn local_and_unresolvable_items_are_never_fetched() {
    let h = Harness::new();
    let mut no_base = MediaItem::photo(id("blank"), "");
    no_base.base_url = None;
    let items = vec![
        MediaItem::photo(id("mine"), "https://cdn.test/mine").local(),
        MediaItem::video(id("clip"), "https://cdn.test/clip").local(),
        no_base,
        MediaItem::photo(id("empty"), ""),
        MediaItem::photo(id("remote"), "https://cdn.test/remote"),
    ];

    h.preloader.preload_around(&items, 0, &resolve);
    settle().await;

    assert_eq!(h.fetcher.requested(), vec![variant("remote", 1080)]);
    assert!(h.surface.requests().is_empty());
}

#[tokio::test]
async fn resolver_returning_empty_string_skips_item() {
    fn blank(_: &MediaItem, _: u32) -> Option<String> {
        Some(String::new())
    }
    let h = Harness::new();

    h.preloader.preload_around(&photos(3), 0, &blank);
    h.preloader.preload_around(&videos(3), 0, &blank);
    settle().await;

    assert_eq!(h.preloader.image_cache_len(), 0);
    assert_eq!(h.preloader.video_cache_len(), 0);
    assert!(h.surface.requests().is_empty());
}

#[tokio::test]
async fn slow_connection_skips_video_and_shrinks_window() {
    let h = Harness::new().on(EffectiveType::TwoG);
    assert_eq!(h.preloader.connection_class(), ConnectionClass::Slow);

    let mut items = videos(2);
    items.extend(photos(6));

    h.preloader.preload_around(&items, 0, &resolve);
    settle().await;

    assert!(h.surface.requests().is_empty());
    assert_eq!(h.preloader.video_cache_len(), 0);
    assert_eq!(h.preloader.live_video_handles(), 0);
    assert_eq!(h.preloader.stats().video_skipped, 2);
    // Window is 0..=3 on slow: two videos then p0 and p1 at 720px.
    assert_eq!(
        h.fetcher.requested(),
        vec![variant("p0", 720), variant("p1", 720)]
    );
}

#[tokio::test]
async fn save_data_counts_as_slow() {
    let h = Harness::new();
    h.signals.set_save_data(Some(true));

    h.preloader.preload_around(&videos(3), 0, &resolve);

    assert!(h.surface.requests().is_empty());
}

#[tokio::test]
async fn medium_connection_prefetches_video_metadata_at_480p() {
    let h = Harness::new().on(EffectiveType::ThreeG);

    h.preloader.preload_around(&videos(1), 0, &resolve);

    let requests = h.surface.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, variant("v0", 854));
    assert_eq!(requests[0].preload, VideoPreload::Metadata);
    assert_eq!(requests[0].max_resolution, VideoResolution::P480);
    assert!(h.preloader.has_video(&variant("v0", 854)));
    assert_eq!(h.preloader.live_video_handles(), 1);
    assert!(h.surface.probes()[0].is_live());
}

#[tokio::test]
async fn fast_connection_prefetches_video_fully_at_720p() {
    let h = Harness::new();

    h.preloader.preload_around(&videos(1), 0, &resolve);

    let requests = h.surface.requests();
    assert_eq!(requests[0].url, variant("v0", 1280));
    assert_eq!(requests[0].preload, VideoPreload::Auto);
    assert_eq!(requests[0].max_resolution, VideoResolution::P720);
}

#[tokio::test]
async fn repeated_ticks_do_not_duplicate_work() {
    let h = Harness::new();
    let mut items = photos(4);
    items.extend(videos(2));

    for _ in 0..3 {
        h.preloader.preload_around(&items, 1, &resolve);
        settle().await;
    }

    assert_eq!(h.fetcher.requested().len(), 4);
    assert_eq!(h.surface.requests().len(), 2);
    assert_eq!(h.preloader.live_video_handles(), 2);

    let stats = h.preloader.stats();
    assert_eq!(stats.image_requests, 12);
    assert_eq!(stats.image_hits, 8);
    assert_eq!(stats.video_requests, 6);
    assert_eq!(stats.video_hits, 4);
}

#[tokio::test]
async fn live_video_handles_stay_within_registry_limit() {
    let h = Harness::with_capacities(200, 2);
    let items = videos(5);

    h.preloader.preload_around(&items, 0, &resolve);

    let probes = h.surface.probes();
    assert_eq!(probes.len(), 5);
    assert!(h.surface.live_count() <= 2);
    assert_eq!(h.preloader.live_video_handles(), 2);
    assert_eq!(h.preloader.video_cache_len(), 2);

    for probe in &probes[..3] {
        assert!(probe.is_paused());
        assert!(!probe.is_attached());
    }
    for probe in &probes[3..] {
        assert!(probe.is_live());
    }
    assert!(!h.preloader.has_video(&variant("v0", 1280)));
    assert!(h.preloader.has_video(&variant("v4", 1280)));
    assert_eq!(h.preloader.stats().video_disposed, 3);
}

#[tokio::test]
async fn clear_disposes_every_handle_and_empties_caches() {
    let h = Harness::new();
    let mut items = videos(3);
    items.extend(photos(3));

    h.preloader.preload_around(&items, 0, &resolve);
    settle().await;
    assert_eq!(h.preloader.live_video_handles(), 3);
    assert_eq!(h.preloader.image_cache_len(), 3);

    h.preloader.clear();

    for probe in h.surface.probes() {
        assert!(probe.is_paused());
        assert!(!probe.is_attached());
    }
    assert_eq!(h.preloader.image_cache_len(), 0);
    assert_eq!(h.preloader.video_cache_len(), 0);
    assert_eq!(h.preloader.live_video_handles(), 0);
    assert!(!h.preloader.is_image_cached(&variant("p0", 1080)));

    let stats = h.preloader.stats();
    assert_eq!(stats.clears, 1);
    assert_eq!(stats.video_disposed, 3);
}

#[tokio::test]
async fn clear_is_safe_on_an_empty_preloader() {
    let h = Harness::new();
    h.preloader.clear();
    h.preloader.clear();
    assert_eq!(h.preloader.stats().clears, 2);
}

#[tokio::test]
async fn is_image_cached_requires_a_completed_non_empty_load() {
    let fetcher = FakeImageFetcher::default();
    fetcher.respond("https://cdn.test/pending", FetchOutcome::Pending);
    fetcher.respond("https://cdn.test/broken", FetchOutcome::Fail);
    fetcher.respond(
        "https://cdn.test/empty",
        FetchOutcome::Loaded(ImageDimensions::new(0, 0)),
    );
    let h = Harness::with_fetcher(fetcher);

    let urls = [
        "https://cdn.test/ok",
        "https://cdn.test/pending",
        "https://cdn.test/broken",
        "https://cdn.test/empty",
    ];
    h.preloader.preload_image_urls(urls);

    // Requested but not yet run.
    assert!(h.preloader.has_image(urls[0]));
    assert!(!h.preloader.is_image_cached(urls[0]));

    settle().await;

    assert!(h.preloader.is_image_cached(urls[0]));
    assert!(!h.preloader.is_image_cached(urls[1]));
    assert!(!h.preloader.is_image_cached(urls[2]));
    assert!(!h.preloader.is_image_cached(urls[3]));
    assert!(!h.preloader.is_image_cached("https://cdn.test/never"));

    let stats = h.preloader.stats();
    assert_eq!(stats.image_loaded, 2);
    assert_eq!(stats.image_failed, 1);
}

#[tokio::test]
async fn failed_load_is_retried_on_a_later_pass() {
    let fetcher = FakeImageFetcher::default();
    let url = variant("p0", 1080);
    fetcher.respond(url.clone(), FetchOutcome::Fail);
    let h = Harness::with_fetcher(fetcher);
    let items = photos(1);

    h.preloader.preload_around(&items, 0, &resolve);
    settle().await;
    assert!(!h.preloader.is_image_cached(&url));

    h.fetcher.respond(
        url.clone(),
        FetchOutcome::Loaded(ImageDimensions::new(1080, 1080)),
    );
    h.preloader.preload_around(&items, 0, &resolve);
    settle().await;

    assert_eq!(h.fetcher.request_count(&url), 2);
    assert!(h.preloader.is_image_cached(&url));
}

#[tokio::test]
async fn preload_image_urls_skips_cached_and_blank_urls() {
    let h = Harness::new();

    h.preloader
        .preload_image_urls(vec!["https://cdn.test/a", "", "  "]);
    settle().await;
    h.preloader
        .preload_image_urls(vec!["https://cdn.test/a", "https://cdn.test/b"]);
    settle().await;

    assert_eq!(
        h.fetcher.requested(),
        vec!["https://cdn.test/a".to_string(), "https://cdn.test/b".to_string()]
    );
    assert!(h.preloader.is_image_cached("https://cdn.test/b"));
}

#[tokio::test]
async fn image_cache_evicts_least_recently_used() {
    let h = Harness::with_capacities(2, 8);

    h.preloader
        .preload_image_urls(["https://cdn.test/a", "https://cdn.test/b"]);
    settle().await;
    // Touch `a` so `b` is the eviction candidate.
    assert!(h.preloader.is_image_cached("https://cdn.test/a"));
    h.preloader.preload_image_urls(["https://cdn.test/c"]);

    assert_eq!(h.preloader.image_cache_len(), 2);
    assert!(h.preloader.has_image("https://cdn.test/a"));
    assert!(!h.preloader.has_image("https://cdn.test/b"));
    assert!(h.preloader.has_image("https://cdn.test/c"));
    assert_eq!(h.preloader.stats().image_evictions, 1);
}

#[tokio::test]
async fn connection_changes_apply_on_the_next_tick() {
    let h = Harness::new().on(EffectiveType::Slow2g);
    let items = videos(1);

    h.preloader.preload_around(&items, 0, &resolve);
    assert!(h.surface.requests().is_empty());

    h.signals
        .set_effective_type(Some(EffectiveType::FourG));
    h.preloader.preload_around(&items, 0, &resolve);
    assert_eq!(h.surface.requests().len(), 1);
}
