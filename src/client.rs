//! HTTP client for the analysis backend.
//!
//! One request per call and no retries. A 402 means the free quota for this
//! client id is spent; it is an outcome, not an error.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::models::{AnalysisRequest, AnalysisResult, ErrorDetail};

/// Header carrying the anonymous client identifier.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The backend answered with a non-2xx status other than 402.
    #[error("Server returned HTTP {status}")]
    Server {
        status: u16,
        detail: Option<ErrorDetail>,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body is not an analysis result.
    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// What the backend decided about a request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    /// HTTP 402; `detail` is whatever JSON the body held, if any.
    QuotaExceeded { detail: Option<serde_json::Value> },
}

/// Client for `POST /analyze`.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    analyze_url: String,
}

impl AnalysisClient {
    /// Create a client for the backend named in `config`.
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let analyze_url = config.analyze_url()?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AnalysisError::Client)?;

        Ok(Self {
            client,
            analyze_url,
        })
    }

    /// Endpoint this client posts to.
    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Submit content for analysis.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        client_id: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        debug!(
            "POST {} ({} chars, category {})",
            self.analyze_url,
            request.content().chars().count(),
            request.category()
        );

        let resp = self
            .client
            .post(&self.analyze_url)
            .header(CLIENT_ID_HEADER, client_id)
            .json(request)
            .send()
            .await
            .map_err(AnalysisError::Network)?;

        let status = resp.status();

        if status == StatusCode::PAYMENT_REQUIRED {
            let body = resp.bytes().await.unwrap_or_default();
            let detail = serde_json::from_slice::<serde_json::Value>(&body).ok();
            debug!("Paywall detail: {:?}", detail);
            info!("Free limit reached");
            return Ok(AnalysisOutcome::QuotaExceeded { detail });
        }

        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let detail = ErrorDetail::from_body(&body);
            debug!("HTTP {} detail: {:?}", status, detail);
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = resp.bytes().await.map_err(AnalysisError::Network)?;
        let result: AnalysisResult =
            serde_json::from_slice(&body).map_err(|e| AnalysisError::Decode(e.to_string()))?;

        info!(
            "Analysis complete: risk={}",
            result.risk_level.as_deref().unwrap_or("unknown")
        );
        Ok(AnalysisOutcome::Success(result))
    }
}
