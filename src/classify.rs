//! Email classification — delegates category assignment to the classifier backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifyError;

/// Category applied when classification fails or comes back empty.
pub const DEFAULT_CATEGORY: &str = "inbox";

/// Confidence reported when the classifier omits one, and paired with
/// [`DEFAULT_CATEGORY`] when classification fails outright.
pub const NEUTRAL_CONFIDENCE: f64 = 0.7;

/// Category and confidence assigned to one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
}

/// Assigns a category to one (subject, body) pair. Pure I/O, no merging.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, subject: &str, body: &str) -> Result<Classification, ClassifyError>;
}

/// Classifier speaking `POST {base}/classify`.
pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Request body for the classifier backend.
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    subject: &'a str,
    body: &'a str,
}

/// Classifier wire response. Absent fields take lenient defaults so a
/// sparse-but-successful response still classifies the email.
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    #[serde(default)]
    category: String,
    #[serde(default = "neutral_confidence")]
    confidence: f64,
    /// Advisory only ("success", "fallback", ...). Logged, not merged.
    #[serde(default)]
    status: String,
}

fn neutral_confidence() -> f64 {
    NEUTRAL_CONFIDENCE
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, subject: &str, body: &str) -> Result<Classification, ClassifyError> {
        let url = format!("{}/classify", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ClassifyRequest { subject, body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                code: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let wire: ClassifyResponse =
            serde_json::from_slice(&bytes).map_err(|e| ClassifyError::Decode(e.to_string()))?;

        debug!(
            category = %wire.category,
            confidence = wire.confidence,
            status = %wire.status,
            "Classifier response"
        );

        Ok(Classification {
            category: wire.category,
            confidence: wire.confidence,
        })
    }
}
