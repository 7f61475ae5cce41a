use std::collections::VecDeque;
use std::num::NonZeroUsize;

use crate::infra::media::PlayableHandle;

/// Owner of the live handles created for video prefetch.
///
/// Membership is insertion ordered and mirrors the video cache's key set.
/// This is the only place prefetch handles are disposed: when the registry
/// grows past `max_entries` the oldest handle is paused, detached and
/// dropped.
#[derive(Debug)]
pub struct PrefetchResourceRegistry {
    entries: VecDeque<(String, Box<dyn PlayableHandle>)>,
    max_entries: NonZeroUsize,
}

impl PrefetchResourceRegistry {
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.get() + 1),
            max_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys from oldest to newest registration.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Track `handle` under `key` and enforce the size limit.
    ///
    /// A handle already registered under the same key is disposed first, so
    /// one variant never owns two live elements. Returns how many handles
    /// were disposed.
    pub fn register(
        &mut self,
        key: String,
        handle: Box<dyn PlayableHandle>,
    ) -> usize {
        let mut disposed = 0;
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key)
            && let Some((_, mut previous)) = self.entries.remove(pos)
        {
            previous.dispose();
            disposed += 1;
            log::trace!("Replaced prefetch handle for {}", key);
        }

        self.entries.push_back((key, handle));
        disposed + self.evict_if_over_capacity()
    }

    /// Dispose oldest handles until the registry is within its limit.
    pub fn evict_if_over_capacity(&mut self) -> usize {
        let mut disposed = 0;
        while self.entries.len() > self.max_entries.get() {
            let Some((key, mut handle)) = self.entries.pop_front() else {
                break;
            };
            handle.dispose();
            disposed += 1;
            log::trace!("Disposed prefetch handle for {}", key);
        }
        disposed
    }

    /// Dispose and forget every handle.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.entries.len();
        for (_, mut handle) in self.entries.drain(..) {
            handle.dispose();
        }
        count
    }
}
