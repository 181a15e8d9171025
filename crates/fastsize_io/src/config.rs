use fastsize_core::{DEFAULT_CHUNK_SIZE, DetectOptions, SignatureCheck};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Applies to connecting and to every body read.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Sends `Referer: <scheme>://<host>` with each request.
    pub send_referer: bool,
    /// Disables TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
    /// Upper bound on bytes consumed per target.
    pub max_bytes: Option<u64>,
    pub chunk_size: usize,
    /// Verify complete format signatures instead of the 2-byte prefix.
    pub strict_signatures: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            send_referer: true,
            accept_invalid_certs: false,
            max_bytes: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            strict_signatures: false,
        }
    }
}

impl FetchConfig {
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[inline]
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            signature: if self.strict_signatures {
                SignatureCheck::Full
            } else {
                SignatureCheck::Prefix
            },
        }
    }

    #[inline]
    pub fn byte_limit(&self) -> u64 {
        self.max_bytes.unwrap_or(u64::MAX)
    }
}
