use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use reqwest::header::RANGE;
use shoebox_model::VideoPreload;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::ensure_http;
use crate::infra::config::HttpConfig;
use crate::infra::media::{
    MediaSurface, PlayableHandle, PreloadError, Result, VideoPrefetchRequest,
};

/// Creates headless video handles that warm the connection and the first
/// bytes of a variant with a ranged GET.
#[derive(Debug, Clone)]
pub struct HttpVideoSurface {
    client: Client,
    runtime: Handle,
    metadata_bytes: u64,
    auto_bytes: u64,
}

impl HttpVideoSurface {
    pub fn new(client: Client, runtime: Handle, config: &HttpConfig) -> Self {
        Self {
            client,
            runtime,
            metadata_bytes: config.video_metadata_bytes,
            auto_bytes: config.video_auto_bytes,
        }
    }

    fn budget(&self, preload: VideoPreload) -> u64 {
        match preload {
            VideoPreload::Metadata => self.metadata_bytes,
            VideoPreload::Auto => self.auto_bytes,
        }
    }
}

impl MediaSurface for HttpVideoSurface {
    fn create_video(
        &self,
        request: &VideoPrefetchRequest,
    ) -> Box<dyn PlayableHandle> {
        Box::new(HttpVideoHandle {
            url: request.url.clone(),
            budget: self.budget(request.preload),
            client: self.client.clone(),
            runtime: self.runtime.clone(),
            buffered: Arc::new(AtomicU64::new(0)),
            task: None,
            pause_tx: None,
            paused: false,
        })
    }
}

/// A hidden, muted "element" that buffers up to a byte budget.
///
/// Attaching starts buffering, pausing stops it where it is, detaching
/// aborts the transfer. Dropping an attached handle detaches it.
#[derive(Debug)]
pub struct HttpVideoHandle {
    url: String,
    budget: u64,
    client: Client,
    runtime: Handle,
    buffered: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
    pause_tx: Option<oneshot::Sender<()>>,
    paused: bool,
}

impl HttpVideoHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bytes received so far.
    pub fn buffered(&self) -> u64 {
        self.buffered.load(Ordering::Relaxed)
    }
}

impl PlayableHandle for HttpVideoHandle {
    fn attach(&mut self) {
        if self.task.is_some() {
            return;
        }
        let (pause_tx, pause_rx) = oneshot::channel();
        let client = self.client.clone();
        let url = self.url.clone();
        let budget = self.budget;
        let buffered = Arc::clone(&self.buffered);

        self.task = Some(self.runtime.spawn(async move {
            tokio::select! {
                result = buffer(&client, &url, budget, &buffered) => {
                    if let Err(err) = result {
                        log::debug!("Video prefetch failed for {}: {}", url, err);
                    }
                }
                _ = pause_rx => {
                    log::trace!(
                        "Video prefetch paused for {} after {} bytes",
                        url,
                        buffered.load(Ordering::Relaxed)
                    );
                }
            }
        }));
        self.pause_tx = Some(pause_tx);
        self.paused = false;
    }

    fn pause(&mut self) {
        if let Some(tx) = self.pause_tx.take() {
            let _ = tx.send(());
        }
        self.paused = true;
    }

    fn detach(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.pause_tx = None;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_attached(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for HttpVideoHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

async fn buffer(
    client: &Client,
    url: &str,
    budget: u64,
    buffered: &AtomicU64,
) -> Result<()> {
    if budget == 0 {
        return Ok(());
    }
    let target = ensure_http(url)?;

    let mut response = client
        .get(target)
        .header(RANGE, format!("bytes=0-{}", budget - 1))
        .send()
        .await
        .map_err(|e| PreloadError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PreloadError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    // Servers that ignore Range send the whole file; stop at the budget.
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| PreloadError::Network(e.to_string()))?
    {
        let total = buffered.fetch_add(chunk.len() as u64, Ordering::Relaxed)
            + chunk.len() as u64;
        if total >= budget {
            break;
        }
    }

    log::trace!(
        "Buffered {} bytes of {}",
        buffered.load(Ordering::Relaxed),
        url
    );
    Ok(())
}
