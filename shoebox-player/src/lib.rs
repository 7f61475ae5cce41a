//! Shoebox Player library
//!
//! Media preloading for the scrolling photo and video feed: a connection
//! quality probe, bounded LRU caches, the preloader that drives them and the
//! registry that owns hidden prefetch video handles.
//!
//! Notes
//! - Hosts construct one [`MediaPreloader`] per session and share it through
//!   an `Arc`; nothing here is a global.
//! - The HTTP adapters in [`infra::services`] back the `shoebox-player`
//!   binary; hosts with their own media stack implement the traits in
//!   [`infra::media`] instead.
//!
//! [`MediaPreloader`]: domains::preload::MediaPreloader

pub mod domains;
pub mod infra;
