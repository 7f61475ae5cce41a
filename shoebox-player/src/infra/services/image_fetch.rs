use std::io::Cursor;

use reqwest::Client;

use super::ensure_http;
use crate::infra::media::{
    ImageDimensions, ImageFetcher, PreloadError, Result,
};

/// Fetches an image over HTTP and reads its size from the encoded header.
///
/// The body is downloaded in full so the HTTP cache and connection pool are
/// warm for the on-demand load; only the header is decoded.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<ImageDimensions> {
        let target = ensure_http(url)?;

        let response = self
            .client
            .get(target)
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

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PreloadError::Network(e.to_string()))?;

        decode_dimensions(&bytes)
    }
}

/// Read width and height without decoding pixel data.
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PreloadError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| PreloadError::Decode(e.to_string()))?;
    Ok(ImageDimensions::new(width, height))
}
