//! Mail source — fetches raw email batches from the mail backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SourceError;

/// Unprocessed message metadata as served by the mail backend.
///
/// Fields the backend omits decode as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmail {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub snippet: String,
}

/// Where raw email batches come from. Pure I/O, no classification.
#[async_trait]
pub trait MailSource: Send + Sync {
    /// Fetch up to `max_results` raw emails, in the order the backend serves them.
    async fn fetch(&self, max_results: usize) -> Result<Vec<RawEmail>, SourceError>;
}

/// Mail source speaking `GET {base}/emails?max_results=N`.
pub struct HttpMailSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMailSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fire a minimal fetch so the backend can run its first-use account
    /// linking. The result is discarded either way.
    pub async fn warm_up(&self) {
        match self.fetch(1).await {
            Ok(_) => debug!("Mail backend warm-up succeeded"),
            Err(e) => debug!(error = %e, "Mail backend warm-up failed (ignored)"),
        }
    }
}

#[async_trait]
impl MailSource for HttpMailSource {
    async fn fetch(&self, max_results: usize) -> Result<Vec<RawEmail>, SourceError> {
        let url = format!("{}/emails?max_results={}", self.base_url, max_results);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}
