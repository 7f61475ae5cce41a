use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use env_logger::{Builder, Target};
use log::LevelFilter;
use shoebox_model::MediaItem;
use shoebox_player::domains::preload::MediaPreloader;
use shoebox_player::infra::config::Config;
use shoebox_player::infra::constants::http::SETTLE_PERIOD;
use shoebox_player::infra::network::{
    ConnectionQualityProbe, SharedNetworkSignals,
};
use shoebox_player::infra::services::{
    HttpImageFetcher, HttpVideoSurface, build_client,
};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("shoebox_player", LevelFilter::Debug)
        .init();
}

/// Feed items carry base URLs; variants are requested with a width query.
fn resolve_variant(item: &MediaItem, width: u32) -> Option<String> {
    let base = item.base_reference()?;
    let separator = if base.contains('?') { '&' } else { '?' };
    Some(format!("{base}{separator}w={width}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let mut args = std::env::args().skip(1);
    let Some(feed_path) = args.next().map(PathBuf::from) else {
        bail!("usage: shoebox-player <feed.json> [center]");
    };
    let center = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid center index {raw:?}"))?,
        None => 0,
    };

    let config = Config::load();
    let settings = config.validate()?;

    let content = std::fs::read_to_string(&feed_path)
        .with_context(|| format!("reading {}", feed_path.display()))?;
    let items: Vec<MediaItem> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", feed_path.display()))?;

    let client = build_client(&config.http)?;
    let runtime = tokio::runtime::Handle::current();
    let signals = SharedNetworkSignals::new(config.network_snapshot());
    let preloader = Arc::new(MediaPreloader::new(
        settings,
        ConnectionQualityProbe::new(Arc::new(signals)),
        Arc::new(HttpImageFetcher::new(client.clone())),
        Arc::new(HttpVideoSurface::new(
            client,
            runtime.clone(),
            &config.http,
        )),
        runtime,
    ));

    log::info!(
        "Warming {} feed items around {} on a {} connection",
        items.len(),
        center,
        preloader.connection_class()
    );
    preloader.preload_around(&items, center, &resolve_variant);

    tokio::time::sleep(SETTLE_PERIOD).await;

    let stats = preloader.stats();
    log::info!("Preload stats: {:?}", stats);
    println!(
        "images: {} requested, {} loaded, {} failed; videos: {} prefetched, {} skipped",
        stats.image_requests,
        stats.image_loaded,
        stats.image_failed,
        stats.video_requests,
        stats.video_skipped
    );

    preloader.clear();
    Ok(())
}
