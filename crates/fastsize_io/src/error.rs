use fastsize_core::DetectError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: Url, status: u16 },

    #[error("{url} is not an image (content type {content_type:?})")]
    NotImage { url: Url, content_type: String },

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Detect(#[from] DetectError),
}

impl FetchError {
    /// True when the failure came from a deadline rather than bad data.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Client(e) => e.is_timeout(),
            Self::Detect(e) => e.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
