//! Fetch-classify-merge pass over one email batch.
//!
//! **Core invariant: the refresh boundary never surfaces an error.**
//! A failed fetch produces an empty batch; a failed classification
//! produces that one item with the default bucket. Callers always get a
//! usable list.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::classify::{Classifier, DEFAULT_CATEGORY, NEUTRAL_CONFIDENCE};
use crate::ingest::types::DisplayEmail;
use crate::source::{MailSource, RawEmail};

/// Fetch-classify-merge pipeline over the two backend collaborators.
pub struct IngestPipeline {
    source: Arc<dyn MailSource>,
    classifier: Arc<dyn Classifier>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline.
    pub fn new(source: Arc<dyn MailSource>, classifier: Arc<dyn Classifier>) -> Self {
        Self { source, classifier }
    }

    /// Run one refresh pass and return the merged display list.
    ///
    /// Classification calls for the batch run concurrently, but the output
    /// order always equals fetch order regardless of completion order.
    /// The list never exceeds `batch_size` items.
    pub async fn refresh(&self, batch_size: usize) -> Vec<DisplayEmail> {
        let mut raw = match self.source.fetch(batch_size).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Mail fetch failed; serving empty batch");
                return Vec::new();
            }
        };
        raw.truncate(batch_size);

        if raw.is_empty() {
            debug!("Mail backend returned no emails");
            return Vec::new();
        }

        let count = raw.len();
        info!(count, "Classifying email batch");

        let emails = join_all(raw.into_iter().map(|email| self.classify_one(email))).await;

        info!(total = emails.len(), "Batch merge complete");
        emails
    }

    /// Classify a single raw email and merge it into a display record.
    ///
    /// Failures never propagate: the item lands in the default bucket with
    /// neutral confidence instead.
    async fn classify_one(&self, raw: RawEmail) -> DisplayEmail {
        let (category, confidence) = match self
            .classifier
            .classify(&raw.subject, &raw.snippet)
            .await
        {
            Ok(found) => {
                let category = if found.category.is_empty() {
                    debug!(
                        subject = %raw.subject,
                        "Classifier returned no category; using default bucket"
                    );
                    DEFAULT_CATEGORY.to_string()
                } else {
                    found.category
                };
                (category, found.confidence.clamp(0.0, 1.0))
            }
            Err(e) => {
                warn!(
                    subject = %raw.subject,
                    error = %e,
                    "Classification failed; using default bucket"
                );
                (DEFAULT_CATEGORY.to_string(), NEUTRAL_CONFIDENCE)
            }
        };

        DisplayEmail {
            id: Uuid::new_v4(),
            sender: raw.sender,
            subject: raw.subject,
            snippet: raw.snippet,
            received_at: Utc::now(),
            is_read: false,
            is_starred: false,
            category,
            confidence,
        }
    }
}
