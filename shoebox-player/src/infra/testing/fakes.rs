use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::infra::media::{
    ImageDimensions, ImageFetcher, MediaSurface, PlayableHandle, PreloadError,
    Result, VideoPrefetchRequest,
};

/// How a [`FakeImageFetcher`] answers a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(ImageDimensions),
    Fail,
    /// Never completes.
    Pending,
}

/// Image fetcher that records every URL and answers from a script.
#[derive(Debug)]
pub struct FakeImageFetcher {
    default: FetchOutcome,
    overrides: Mutex<HashMap<String, FetchOutcome>>,
    requested: Mutex<Vec<String>>,
}

impl Default for FakeImageFetcher {
    fn default() -> Self {
        Self::new(FetchOutcome::Loaded(ImageDimensions::new(1080, 1350)))
    }
}

impl FakeImageFetcher {
    pub fn new(default: FetchOutcome) -> Self {
        Self {
            default,
            overrides: Mutex::new(HashMap::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, url: impl Into<String>, outcome: FetchOutcome) {
        self.overrides.lock().insert(url.into(), outcome);
    }

    /// URLs in the order they were fetched, repeats included.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requested.lock().iter().filter(|u| *u == url).count()
    }
}

#[async_trait::async_trait]
impl ImageFetcher for FakeImageFetcher {
    async fn fetch(&self, url: &str) -> Result<ImageDimensions> {
        self.requested.lock().push(url.to_string());
        let outcome = self
            .overrides
            .lock()
            .get(url)
            .copied()
            .unwrap_or(self.default);

        match outcome {
            FetchOutcome::Loaded(dimensions) => Ok(dimensions),
            FetchOutcome::Fail => {
                Err(PreloadError::Network(format!("scripted failure: {url}")))
            }
            FetchOutcome::Pending => std::future::pending().await,
        }
    }
}

#[derive(Debug, Default)]
struct HandleState {
    attached: AtomicBool,
    paused: AtomicBool,
}

/// Observer side of a [`FakeHandle`]. Clones share state, so a test keeps
/// the probe while the registry owns the handle.
#[derive(Debug, Clone, Default)]
pub struct FakeHandleProbe {
    state: Arc<HandleState>,
}

impl FakeHandleProbe {
    pub fn handle(&self) -> Box<dyn PlayableHandle> {
        Box::new(FakeHandle {
            state: Arc::clone(&self.state),
        })
    }

    /// A handle that is already attached and buffering.
    pub fn attached_handle(&self) -> Box<dyn PlayableHandle> {
        let mut handle = self.handle();
        handle.attach();
        handle
    }

    pub fn is_attached(&self) -> bool {
        self.state.attached.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.is_paused() && !self.is_attached()
    }

    /// Attached and not paused.
    pub fn is_live(&self) -> bool {
        self.is_attached() && !self.is_paused()
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    state: Arc<HandleState>,
}

impl PlayableHandle for FakeHandle {
    fn attach(&mut self) {
        self.state.paused.store(false, Ordering::SeqCst);
        self.state.attached.store(true, Ordering::SeqCst);
    }

    fn pause(&mut self) {
        self.state.paused.store(true, Ordering::SeqCst);
    }

    fn detach(&mut self) {
        self.state.attached.store(false, Ordering::SeqCst);
    }

    fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
    }

    fn is_attached(&self) -> bool {
        self.state.attached.load(Ordering::SeqCst)
    }
}

/// Surface that hands out [`FakeHandle`]s and keeps a probe for each.
#[derive(Debug, Default)]
pub struct FakeSurface {
    created: Mutex<Vec<(VideoPrefetchRequest, FakeHandleProbe)>>,
}

impl FakeSurface {
    pub fn requests(&self) -> Vec<VideoPrefetchRequest> {
        self.created.lock().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn probes(&self) -> Vec<FakeHandleProbe> {
        self.created.lock().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn probe_for(&self, url: &str) -> Option<FakeHandleProbe> {
        self.created
            .lock()
            .iter()
            .rev()
            .find(|(r, _)| r.url == url)
            .map(|(_, p)| p.clone())
    }

    pub fn live_count(&self) -> usize {
        self.created.lock().iter().filter(|(_, p)| p.is_live()).count()
    }
}

impl MediaSurface for FakeSurface {
    fn create_video(
        &self,
        request: &VideoPrefetchRequest,
    ) -> Box<dyn PlayableHandle> {
        let probe = FakeHandleProbe::default();
        let handle = probe.handle();
        self.created.lock().push((request.clone(), probe));
        handle
    }
}
