//! Connection-aware media preloading for the scrolling feed.
//!
//! The feed reports the centred item on every scroll tick; the
//! [`MediaPreloader`] works out a window around it, picks sizes and video
//! behaviour from the current [`ConnectionClass`], and issues fire-and-forget
//! prefetches into bounded caches.
//!
//! [`ConnectionClass`]: shoebox_model::ConnectionClass

pub mod image_slot;
pub mod policy;
pub mod preloader;
pub mod resolver;
pub mod window;

pub use image_slot::{ImageLoadState, ImageSlot};
pub use policy::{PolicyTable, PreloadPolicy, PreloadSettings, VideoPolicy};
pub use preloader::MediaPreloader;
pub use resolver::VariantResolver;
pub use window::prefetch_window;
