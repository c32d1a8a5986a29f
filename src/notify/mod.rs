//! Notification categorization
//!
//! Pure, deterministic classification of notification records into one of
//! four categories, used for client-side filtering and counts. The category
//! is derived per render and never persisted or sent back to the server.

use std::fmt;

use crate::client::models::NotificationRecord;

/// Derived notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Category {
    /// Attack and threat activity
    Security,
    /// Firewall block/unblock actions
    Blocking,
    /// Agent and service housekeeping
    System,
    /// Everything else
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Security => "security",
            Category::Blocking => "blocking",
            Category::System => "system",
            Category::Other => "other",
        };
        write!(f, "{}", label)
    }
}

const SECURITY_TERMS: &[&str] = &["brute force", "threat", "attack", "intrusion", "suspicious"];
const BLOCKING_TERMS: &[&str] = &["blocked", "block", "banned", "unblock", "firewall"];
const SYSTEM_TERMS: &[&str] = &["system", "status", "agent", "service", "config"];

/// Classify a notification into exactly one category.
///
/// First match wins: the security flag and security terms take priority over
/// blocking terms, which take priority over system terms. Matching is
/// case-insensitive substring search over subject and message. Total
/// function: always returns a category, never fails.
pub fn classify(record: &NotificationRecord) -> Category {
    if record.is_security_alert {
        return Category::Security;
    }

    let haystack = format!("{} {}", record.subject, record.message).to_lowercase();

    if contains_any(&haystack, SECURITY_TERMS) {
        Category::Security
    } else if contains_any(&haystack, BLOCKING_TERMS) {
        Category::Blocking
    } else if contains_any(&haystack, SYSTEM_TERMS) {
        Category::System
    } else {
        Category::Other
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}

/// Per-category tallies for the history view tabs
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategoryCounts {
    pub security: usize,
    pub blocking: usize,
    pub system: usize,
    pub other: usize,
}

impl CategoryCounts {
    pub fn tally(records: &[NotificationRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match classify(record) {
                Category::Security => counts.security += 1,
                Category::Blocking => counts.blocking += 1,
                Category::System => counts.system += 1,
                Category::Other => counts.other += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.security + self.blocking + self.system + self.other
    }
}
