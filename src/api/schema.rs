//! Response schemas for the backend's JSON endpoints
//!
//! Required fields are the ones a check relies on. Decoding a response that
//! lacks one of them is reported as a decode error rather than a silent miss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A status check record (`POST /status`, `GET /status`, `GET /status/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Server-generated identifier in canonical UUID form
    pub id: String,
    pub client_name: String,
    /// ISO-8601 creation time
    pub timestamp: String,
}

/// Response of `GET /news-ticker`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsTicker {
    pub success: bool,
    pub items: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// One entry of the news ticker
///
/// Items carry many optional presentation fields (images, summaries,
/// categories); those are kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of extracting the lead image of one article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageExtraction {
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extraction_method: Option<String>,
    #[serde(default)]
    pub cached: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /fetch-multiple-news-images`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchImageExtraction {
    pub success: bool,
    #[serde(default)]
    pub total_urls: Option<u64>,
    #[serde(default)]
    pub successful_extractions: Option<u64>,
    #[serde(default)]
    pub failed_extractions: Option<u64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    pub results: Vec<ImageExtraction>,
}

/// Whether `id` has the canonical textual UUID shape: 36 characters, 4 hyphens
pub fn is_canonical_uuid(id: &str) -> bool {
    id.chars().count() == 36 && id.matches('-').count() == 4
}
