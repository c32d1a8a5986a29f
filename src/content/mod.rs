//! Per-feature content request definitions
//!
//! The one place that pairs a cache key with its TTL, validity predicate,
//! and default content. Page-level code never defines its own cache keys.

use crate::cache::CacheTtl;
use crate::client::models::{FirewallState, GuideContent, NotificationRecord, ReportContent};
use crate::loader::ContentRequest;
use crate::wizard;

/// A report must carry at least this many sections to be rendered from
/// cache; thinner payloads predate the current report generator.
pub const MIN_REPORT_SECTIONS: usize = 10;

/// Onboarding guide. Falls back to the baked-in steps so `guardop guide`
/// always has something to show.
pub fn guide() -> ContentRequest<GuideContent> {
    ContentRequest {
        feature: "guide",
        ttl: CacheTtl::GUIDE,
        validate: wizard::guide_is_complete,
        fallback: Some(wizard::default_guide_content),
    }
}

/// Thesis/report content. No fallback; an unreachable server is surfaced
/// as an error rather than a stub report.
pub fn report() -> ContentRequest<ReportContent> {
    ContentRequest {
        feature: "report",
        ttl: CacheTtl::REPORT,
        validate: |r| r.sections.len() >= MIN_REPORT_SECTIONS,
        fallback: None,
    }
}

/// Firewall state snapshot
pub fn firewall() -> ContentRequest<FirewallState> {
    ContentRequest {
        feature: "firewall",
        ttl: CacheTtl::FIREWALL,
        validate: |_| true,
        fallback: None,
    }
}

/// Notification history
pub fn notifications() -> ContentRequest<Vec<NotificationRecord>> {
    ContentRequest {
        feature: "notifications",
        ttl: CacheTtl::NOTIFICATIONS,
        validate: |_| true,
        fallback: None,
    }
}
