//! Inbox state — the latest snapshot produced by the refresh loop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::classify::DEFAULT_CATEGORY;
use crate::ingest::types::{DisplayEmail, category_counts};

/// The complete result of one refresh cycle.
///
/// Snapshots are replaced wholesale: nothing is merged or deduplicated
/// across cycles, and read/star flags reset with each replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxSnapshot {
    pub emails: Vec<DisplayEmail>,
    /// When this snapshot was installed.
    pub refreshed_at: DateTime<Utc>,
    /// Monotonic refresh counter. 0 means no cycle has completed yet.
    pub cycle: u64,
}

impl InboxSnapshot {
    fn empty() -> Self {
        Self {
            emails: Vec::new(),
            refreshed_at: Utc::now(),
            cycle: 0,
        }
    }

    /// Emails matching `category`, case-insensitively.
    ///
    /// `None` or the inbox bucket itself selects the whole list: inbox is
    /// the unfiltered view, not a category like the others.
    pub fn filtered(&self, category: Option<&str>) -> Vec<DisplayEmail> {
        match category {
            None => self.emails.clone(),
            Some(c) if c.eq_ignore_ascii_case(DEFAULT_CATEGORY) => self.emails.clone(),
            Some(c) => self
                .emails
                .iter()
                .filter(|e| e.category.eq_ignore_ascii_case(c))
                .cloned()
                .collect(),
        }
    }

    /// Number of unread emails in this snapshot.
    pub fn unread(&self) -> usize {
        self.emails.iter().filter(|e| !e.is_read).count()
    }

    /// Per-category counts with the inbox entry pinned to the total.
    pub fn counts(&self) -> HashMap<String, usize> {
        category_counts(&self.emails)
    }
}

/// Shared holder of the most recent snapshot.
pub struct InboxState {
    snapshot: RwLock<InboxSnapshot>,
}

impl InboxState {
    /// Create state holding an empty cycle-0 snapshot.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            snapshot: RwLock::new(InboxSnapshot::empty()),
        })
    }

    /// Install a new snapshot, dropping the previous one.
    /// Returns the new cycle number.
    pub async fn replace(&self, emails: Vec<DisplayEmail>) -> u64 {
        let mut snapshot = self.snapshot.write().await;
        let cycle = snapshot.cycle + 1;
        debug!(cycle, total = emails.len(), "Replacing inbox snapshot");
        *snapshot = InboxSnapshot {
            emails,
            refreshed_at: Utc::now(),
            cycle,
        };
        cycle
    }

    /// Clone of the current snapshot.
    pub async fn snapshot(&self) -> InboxSnapshot {
        self.snapshot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn email(category: &str, is_read: bool) -> DisplayEmail {
        DisplayEmail {
            id: Uuid::new_v4(),
            sender: "sender@example.com".into(),
            subject: "subject".into(),
            snippet: "snippet".into(),
            received_at: Utc::now(),
            is_read,
            is_starred: false,
            category: category.into(),
            confidence: 0.8,
        }
    }

    #[tokio::test]
    async fn starts_empty_at_cycle_zero() {
        let state = InboxState::new();
        let snapshot = state.snapshot().await;
        assert!(snapshot.emails.is_empty());
        assert_eq!(snapshot.cycle, 0);
    }

    #[tokio::test]
    async fn replace_advances_cycle_and_timestamp() {
        let state = InboxState::new();
        let initial = state.snapshot().await;

        let cycle = state.replace(vec![email("Jobs", false)]).await;
        assert_eq!(cycle, 1);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.cycle, 1);
        assert_eq!(snapshot.emails.len(), 1);
        assert!(snapshot.refreshed_at >= initial.refreshed_at);

        let cycle = state.replace(Vec::new()).await;
        assert_eq!(cycle, 2);
        assert!(state.snapshot().await.emails.is_empty());
    }

    #[tokio::test]
    async fn replace_is_wholesale_not_a_merge() {
        let state = InboxState::new();
        state
            .replace(vec![email("Jobs", false), email("Events", false)])
            .await;
        state.replace(vec![email("Payments", false)]).await;

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.emails.len(), 1);
        assert_eq!(snapshot.emails[0].category, "Payments");
    }

    #[test]
    fn filter_inbox_selects_everything() {
        let snapshot = InboxSnapshot {
            emails: vec![email("Jobs", false), email("Events", false)],
            refreshed_at: Utc::now(),
            cycle: 1,
        };
        assert_eq!(snapshot.filtered(None).len(), 2);
        assert_eq!(snapshot.filtered(Some("inbox")).len(), 2);
        assert_eq!(snapshot.filtered(Some("Inbox")).len(), 2);
    }

    #[test]
    fn filter_matches_category_case_insensitively() {
        let snapshot = InboxSnapshot {
            emails: vec![email("Jobs", false), email("jobs", false), email("Events", false)],
            refreshed_at: Utc::now(),
            cycle: 1,
        };
        assert_eq!(snapshot.filtered(Some("JOBS")).len(), 2);
        assert_eq!(snapshot.filtered(Some("events")).len(), 1);
        assert!(snapshot.filtered(Some("payments")).is_empty());
    }

    #[test]
    fn unread_counts_only_unread() {
        let snapshot = InboxSnapshot {
            emails: vec![email("Jobs", true), email("Jobs", false), email("Events", false)],
            refreshed_at: Utc::now(),
            cycle: 1,
        };
        assert_eq!(snapshot.unread(), 2);
    }

    #[test]
    fn counts_delegate_with_inbox_pinned() {
        let snapshot = InboxSnapshot {
            emails: vec![email("Jobs", false), email("Events", false)],
            refreshed_at: Utc::now(),
            cycle: 1,
        };
        let counts = snapshot.counts();
        assert_eq!(counts["inbox"], 2);
        assert_eq!(counts["jobs"], 1);
        assert_eq!(counts["events"], 1);
    }
}
