use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::FetchError;

/// Something to probe: a remote resource or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(Url),
    File(PathBuf),
}

impl Target {
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let lower = input.trim_start().to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            if let Some((scheme, _)) = input.split_once("://") {
                return Err(FetchError::UnsupportedScheme(scheme.to_string()));
            }
            return Ok(Self::File(PathBuf::from(input)));
        }

        Url::parse(input.trim())
            .map(Self::Url)
            .map_err(|source| FetchError::InvalidUrl {
                input: input.to_string(),
                source,
            })
    }
}

impl FromStr for Target {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
