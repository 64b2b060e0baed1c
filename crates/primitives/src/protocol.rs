//! Search request/response pair exchanged between validators and miners.
//!
//! Only the logical shape is defined here. Encoding on the wire is left to
//! whichever transport carries these types.

use serde::{Deserialize, Serialize};

/// A search query sent to a miner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query text.
    pub query: String,
}

impl SearchRequest {
    /// Create a request for the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Returns `true` if the query is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// A single search hit returned by a miner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Short preview of the result content.
    pub preview_text: String,
    /// Base64 encoded image.
    pub image_base64: String,
    /// URL of the page hosting the result.
    pub host_url: String,
}

/// A miner's answer to a [`SearchRequest`].
///
/// `result` is `None` when the miner processed the query but found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The result, if any.
    pub result: Option<SearchResult>,
}

impl SearchResponse {
    /// A response carrying a result.
    pub fn found(result: SearchResult) -> Self {
        Self {
            result: Some(result),
        }
    }

    /// A response without a result.
    pub fn empty() -> Self {
        Self { result: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query() {
        assert!(SearchRequest::new("").is_blank());
        assert!(SearchRequest::new("  \t").is_blank());
        assert!(!SearchRequest::new("rust async").is_blank());
    }
}
