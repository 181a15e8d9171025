//! HTTP response bodies as stream sources.

use fastsize_core::{Detection, detect_with};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, REFERER};
use std::io::{self, Read, Take};
use tracing::{debug, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};

/// Issues GET requests and validates that the response is an image.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client, config })
    }

    #[inline]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Sends the request and checks status and content type.
    ///
    /// The returned source holds the open connection; dropping it closes it.
    pub fn open(&self, url: &Url) -> Result<HttpSource> {
        let mut request = self.client.get(url.clone());
        if self.config.send_referer {
            if let Some(referer) = referer_for(url) {
                request = request.header(REFERER, referer);
            }
        }

        debug!(%url, "requesting");
        let response = request.send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("image") {
            return Err(FetchError::NotImage {
                url: url.clone(),
                content_type,
            });
        }

        debug!(%url, %content_type, length = ?response.content_length(), "response accepted");

        Ok(HttpSource {
            body: response.take(self.config.byte_limit()),
            content_type,
        })
    }

    pub fn detect(&self, url: &Url) -> Result<Detection> {
        let mut source = self.open(url)?;
        let detection = detect_with(
            &mut source,
            &self.config.detect_options(),
            self.config.chunk_size,
        )?;
        debug!(
            %url,
            content_type = source.content_type(),
            bytes_read = detection.bytes_read,
            "detected"
        );
        Ok(detection)
    }
}

/// An open response body, capped at the configured byte limit.
#[derive(Debug)]
pub struct HttpSource {
    body: Take<Response>,
    content_type: String,
}

impl HttpSource {
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl Read for HttpSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf).map_err(classify_read_error)
    }
}

/// reqwest reports body-read deadlines as opaque I/O errors.
fn classify_read_error(err: io::Error) -> io::Error {
    let timed_out = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
        .is_some_and(reqwest::Error::is_timeout);

    if timed_out && err.kind() != io::ErrorKind::TimedOut {
        io::Error::new(io::ErrorKind::TimedOut, err)
    } else {
        err
    }
}

fn referer_for(url: &Url) -> Option<String> {
    url.host_str()
        .map(|host| format!("{}://{}", url.scheme(), host))
}
