//! Stream sources for fastsize: HTTP response bodies and local files.
//!
//! Connection setup, request headers, TLS policy and response validation live
//! here so the detector itself only ever sees a forward-only byte stream.

mod config;
mod error;
mod file;
mod http;
mod target;

pub use config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FetchConfig};
pub use error::{FetchError, Result};
pub use file::{FileSource, detect_file};
pub use http::{HttpFetcher, HttpSource};
pub use target::Target;

use fastsize_core::{Detection, ImageSize, ImageType};
use url::Url;

/// Detects targets of either kind with one configuration.
#[derive(Debug, Clone)]
pub struct Prober {
    fetcher: HttpFetcher,
}

impl Prober {
    pub fn new(config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(config)?,
        })
    }

    #[inline]
    pub fn config(&self) -> &FetchConfig {
        self.fetcher.config()
    }

    pub fn probe(&self, target: &Target) -> Result<Detection> {
        match target {
            Target::Url(url) => self.fetcher.detect(url),
            Target::File(path) => detect_file(path, self.fetcher.config()),
        }
    }
}

/// Fetches `url` with the default configuration and returns its type and size.
pub fn get_image_size(url: &str) -> Result<(ImageType, ImageSize)> {
    let url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        input: url.to_string(),
        source,
    })?;
    let detection = HttpFetcher::new(FetchConfig::default())?.detect(&url)?;
    Ok((detection.image_type, detection.size))
}
