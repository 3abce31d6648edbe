//! Core record types and error definitions for the extraction pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One extracted article, serialized as a single JSON line in a shard file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Page title; `null` in the output when the dump omitted the element.
    pub title: Option<String>,
    /// Whitespace-normalized article body. Never empty and never a redirect stub.
    pub text: String,
}

/// Fatal errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The archive could not be opened or a shard could not be written.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// The compressed stream is corrupt mid-read; the remaining bytes cannot be trusted.
    #[error("corrupt dump stream: {0}")]
    Decode(#[source] std::io::Error),
}

/// Failure to parse a single page's markup.
///
/// Scoped to that page alone: the driver logs it and moves on to the next page span.
#[derive(Debug, Error)]
#[error("malformed page markup: {0}")]
pub struct PageParseError(#[from] quick_xml::Error);

/// Final counters reported for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    /// Total page spans seen, including malformed and filtered ones.
    pub pages_seen: u64,
    /// Number of shard files written.
    pub shards_written: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_title_and_text_only() {
        let record = ArticleRecord {
            title: Some("A".to_string()),
            text: "Hello world".to_string(),
        };
        let json = serde_json::to_string(&record).expect("record serializes");
        assert_eq!(json, r#"{"title":"A","text":"Hello world"}"#);
    }

    #[test]
    fn absent_title_serializes_as_null() {
        let record = ArticleRecord {
            title: None,
            text: "body".to_string(),
        };
        let json = serde_json::to_string(&record).expect("record serializes");
        assert_eq!(json, r#"{"title":null,"text":"body"}"#);
    }

    #[test]
    fn non_ascii_content_is_not_escaped() {
        let record = ArticleRecord {
            title: Some("Zürich".to_string()),
            text: "Grüezi, ヴィキペディア".to_string(),
        };
        let json = serde_json::to_string(&record).expect("record serializes");
        assert!(json.contains("Zürich"));
        assert!(json.contains("ヴィキ"));
        assert!(!json.contains("\\u"));
    }
}
