//! Where image bytes come from: a local file or an http(s) URL.
//!
//! This is boundary plumbing for the binary; the analysis itself only ever sees bytes.

use crate::config::HostRewrite;
use log::{debug, info};
use reqwest::{Client, Url};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error while reading image: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request for image failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid image URL '{0}'")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(Url),
}

impl ImageSource {
    /// Treats `http://` and `https://` inputs as URLs and everything else as a path.
    pub fn parse(input: &str, rewrite: Option<&HostRewrite>) -> Result<Self, SourceError> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            normalize_url(trimmed, rewrite).map(Self::Url)
        } else {
            Ok(Self::Path(PathBuf::from(trimmed)))
        }
    }

    pub async fn load(&self, client: &Client) -> Result<Vec<u8>, SourceError> {
        match self {
            Self::Path(path) => {
                info!("Processing file input {}", path.display());
                Ok(tokio::fs::read(path).await?)
            }
            Self::Url(url) => {
                info!("Processing URL input {url}");
                let response = client.get(url.clone()).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

/// Parses an image URL and applies the configured host rewrite, if its
/// `host[:port]` authority matches.
pub fn normalize_url(raw: &str, rewrite: Option<&HostRewrite>) -> Result<Url, SourceError> {
    let invalid = || SourceError::InvalidUrl(raw.to_string());
    let mut url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let host = url.host_str().ok_or_else(invalid)?.to_ascii_lowercase();

    let Some(rewrite) = rewrite else {
        return Ok(url);
    };
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    };
    if authority != rewrite.from {
        return Ok(url);
    }

    let (new_host, new_port) = match rewrite.to.rsplit_once(':') {
        Some((h, p)) => (h, Some(p.parse::<u16>().map_err(|_| invalid())?)),
        None => (rewrite.to.as_str(), None),
    };
    url.set_host(Some(new_host)).map_err(|_| invalid())?;
    url.set_port(new_port).map_err(|_| invalid())?;
    debug!("Rewrote image URL {raw} to {url}");
    Ok(url)
}
