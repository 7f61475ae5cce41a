//! HTTP-backed implementations of the media seams, used by the binary and
//! by hosts without their own media stack.

pub mod image_fetch;
pub mod video_buffer;

pub use image_fetch::HttpImageFetcher;
pub use video_buffer::{HttpVideoHandle, HttpVideoSurface};

use reqwest::Client;

use crate::infra::config::HttpConfig;
use crate::infra::media::{PreloadError, Result};

/// Pooled client shared by both adapters.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .timeout(config.timeout())
        .build()
        .map_err(|e| PreloadError::Network(e.to_string()))
}

pub(crate) fn ensure_http(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw)
        .map_err(|_| PreloadError::UnsupportedUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(PreloadError::UnsupportedUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_schemes_are_supported() {
        assert!(ensure_http("https://cdn.example.com/a.jpg").is_ok());
        assert!(ensure_http("http://cdn.example.com/a.jpg").is_ok());
        assert!(matches!(
            ensure_http("file:///tmp/a.jpg"),
            Err(PreloadError::UnsupportedUrl(_))
        ));
        assert!(matches!(
            ensure_http("not a url"),
            Err(PreloadError::UnsupportedUrl(_))
        ));
    }
}
