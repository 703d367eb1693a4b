//! Wire types for the analysis endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::MIN_CONTENT_CHARS;

/// Raised locally when content is too short to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content must be at least {min} characters (got {actual})")]
pub struct ValidationError {
    pub min: usize,
    pub actual: usize,
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    content: String,
    category: String,
}

impl AnalysisRequest {
    /// Build a request from raw user input.
    ///
    /// The content is trimmed and must have at least [`MIN_CONTENT_CHARS`]
    /// characters left.
    pub fn new(content: &str, category: &str) -> Result<Self, ValidationError> {
        let content = content.trim();
        let actual = content.chars().count();
        if actual < MIN_CONTENT_CHARS {
            return Err(ValidationError {
                min: MIN_CONTENT_CHARS,
                actual,
            });
        }
        Ok(Self {
            content: content.to_string(),
            category: category.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Successful analysis payload.
///
/// Every field may be missing or `null`; rendering supplies the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub red_flag_score: Option<f64>,
    #[serde(default)]
    pub manipulation_tactics: Option<Vec<String>>,
    #[serde(default)]
    pub missing_proof: Option<Vec<String>>,
    #[serde(default)]
    pub verification_checklist: Option<Vec<String>>,
    #[serde(default)]
    pub safe_reply: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub free_uses_left: Option<i64>,
}

/// Accept integer counts sent as floats (`3.0`); anything else is unknown.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
    }))
}

/// The `detail` field of an error body: either a message or structured data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Structured(serde_json::Value),
}

impl ErrorDetail {
    /// Extract `detail` from a raw error body, if there is one.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            detail: Option<ErrorDetail>,
        }

        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !matches!(d, ErrorDetail::Structured(serde_json::Value::Null)))
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Text(s) => s.clone(),
            ErrorDetail::Structured(v) => v.to_string(),
        }
    }
}
