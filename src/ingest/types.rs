//! Display-ready email records and derived counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::DEFAULT_CATEGORY;

/// One classified email, ready for display.
///
/// Owned by the snapshot of the cycle that produced it. Identity does not
/// survive across cycles: the same upstream message gets a fresh `id` and
/// `received_at` every time it is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayEmail {
    /// Unique within one refresh cycle.
    pub id: Uuid,
    pub sender: String,
    pub subject: String,
    pub snippet: String,
    /// When the merge captured this item, not when the mail arrived upstream.
    pub received_at: DateTime<Utc>,
    pub is_read: bool,
    pub is_starred: bool,
    /// Never empty. Falls back to the inbox bucket when classification fails.
    pub category: String,
    /// Clamped to [0.0, 1.0].
    pub confidence: f64,
}

/// Per-category item counts, keyed by lower-cased category name.
///
/// The `"inbox"` entry is pinned to the total list length: it stands for
/// the unfiltered view, not for items whose category happens to be inbox.
pub fn category_counts(emails: &[DisplayEmail]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for email in emails {
        *counts.entry(email.category.to_lowercase()).or_insert(0) += 1;
    }
    counts.insert(DEFAULT_CATEGORY.to_string(), emails.len());
    counts
}
