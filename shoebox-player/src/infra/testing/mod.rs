//! Test doubles for the media seams.
//!
//! Public so integration tests and downstream hosts can drive a
//! [`MediaPreloader`](crate::domains::preload::MediaPreloader) without a
//! network or a render tree.

pub mod fakes;

pub use fakes::*;

/// Let spawned prefetch tasks run to completion on a current-thread runtime.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
