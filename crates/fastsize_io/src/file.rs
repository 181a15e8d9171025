//! Local files as stream sources.

use fastsize_core::{Detection, detect_with};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Take};
use std::path::Path;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};

/// A read-only file consumed front to back, like a response body.
///
/// # Example
///
/// ```ignore
/// use fastsize_io::FileSource;
///
/// let mut source = FileSource::open("photo.jpg", u64::MAX)?;
/// let (image_type, size) = fastsize_core::detect(&mut source)?;
/// ```
#[derive(Debug)]
pub struct FileSource {
    file: Take<File>,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>, limit: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(false)
            .open(path)
            .map_err(|source| FetchError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{Advice, fadvise};

            let _ = fadvise(&file, 0, None, Advice::Sequential);
            let _ = fadvise(&file, 0, None, Advice::NoReuse);
        }

        Ok(Self {
            file: file.take(limit),
        })
    }
}

impl Read for FileSource {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

pub fn detect_file(path: impl AsRef<Path>, config: &FetchConfig) -> Result<Detection> {
    let path = path.as_ref();
    let mut source = FileSource::open(path, config.byte_limit())?;
    let detection = detect_with(&mut source, &config.detect_options(), config.chunk_size)?;
    debug!(path = %path.display(), bytes_read = detection.bytes_read, "detected");
    Ok(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastsize_core::{CoreError, ImageSize, ImageType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn gif_file() -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"GIF89a\x40\x01\xF0\x00\x00\x00\x00").unwrap();
        temp.write_all(&[0u8; 4096]).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_detect_file() {
        let temp = gif_file();
        let detection = detect_file(temp.path(), &FetchConfig::default()).unwrap();
        assert_eq!(detection.image_type, ImageType::Gif);
        assert_eq!(detection.size, ImageSize::new(320, 240));
    }

    #[test]
    fn test_byte_limit_truncates_stream() {
        let temp = gif_file();
        let config = FetchConfig {
            max_bytes: Some(8),
            ..FetchConfig::default()
        };
        let err = detect_file(temp.path(), &config).unwrap_err();
        match err {
            FetchError::Detect(e) => {
                assert_eq!(e.image_type(), ImageType::Gif);
                assert!(matches!(
                    e.kind(),
                    CoreError::InsufficientData { available: 8, .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect_file(dir.path().join("absent.png"), &FetchConfig::default()).unwrap_err();
        assert!(matches!(err, FetchError::Open { .. }));
    }
}
