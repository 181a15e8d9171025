use serde::Serialize;

use crate::engine::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `target<TAB>TYPE<TAB>WxH`, or `target<TAB>error<TAB>message`.
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_read: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn render(outcome: &Outcome, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Text => Ok(match &outcome.result {
            Ok(d) => format!("{}\t{}\t{}", outcome.target, d.image_type, d.size),
            Err(e) => format!("{}\terror\t{}", outcome.target, e),
        }),
        Format::Json => {
            let record = match &outcome.result {
                Ok(d) => Record {
                    target: &outcome.target,
                    image_type: Some(d.image_type.name()),
                    width: Some(d.size.width),
                    height: Some(d.size.height),
                    bytes_read: Some(d.bytes_read),
                    error: None,
                },
                Err(e) => Record {
                    target: &outcome.target,
                    image_type: None,
                    width: None,
                    height: None,
                    bytes_read: None,
                    error: Some(e.to_string()),
                },
            };
            serde_json::to_string(&record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastsize_core::{Detection, ImageSize, ImageType};
    use fastsize_io::FetchError;

    fn ok() -> Outcome {
        Outcome {
            index: 0,
            target: "a.gif".to_string(),
            result: Ok(Detection {
                image_type: ImageType::Gif,
                size: ImageSize::new(300, 200),
                bytes_read: 10,
            }),
        }
    }

    fn failed() -> Outcome {
        Outcome {
            index: 1,
            target: "ftp://x".to_string(),
            result: Err(FetchError::UnsupportedScheme("ftp".to_string())),
        }
    }

    #[test]
    fn test_text() {
        assert_eq!(render(&ok(), Format::Text).unwrap(), "a.gif\tGIF\t300x200");
        assert!(render(&failed(), Format::Text).unwrap().starts_with("ftp://x\terror\t"));
    }

    #[test]
    fn test_json() {
        let value: serde_json::Value =
            serde_json::from_str(&render(&ok(), Format::Json).unwrap()).unwrap();
        assert_eq!(value["image_type"], "GIF");
        assert_eq!(value["width"], 300);
        assert_eq!(value["bytes_read"], 10);
        assert!(value.get("error").is_none());

        let value: serde_json::Value =
            serde_json::from_str(&render(&failed(), Format::Json).unwrap()).unwrap();
        assert!(value["error"].as_str().unwrap().contains("ftp"));
        assert!(value.get("width").is_none());
    }
}
