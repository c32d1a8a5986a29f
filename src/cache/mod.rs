//! Local cache for Guardian content
//!
//! Provides SQLite-backed storage of JSON payloads with a wall-clock TTL,
//! used to avoid refetching semi-static content (guide, report) and to keep
//! dashboard views responsive between refreshes.

pub mod storage;

use std::time::Duration;

/// Cache TTL configuration per content type
///
/// The TTL is a per-content-type constant, never stored per entry. Guide
/// and report content is close to static; firewall state and notification
/// history go stale quickly.
pub struct CacheTtl;

impl CacheTtl {
    // Semi-static content
    pub const GUIDE: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
    pub const REPORT: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr

    // Live dashboard state
    pub const FIREWALL: Duration = Duration::from_secs(5 * 60); // 5 min
    pub const NOTIFICATIONS: Duration = Duration::from_secs(60); // 1 min

    /// Resolve the TTL for a feature key, defaulting to the shortest TTL
    /// for anything unrecognized.
    pub fn for_feature(feature: &str) -> Duration {
        match feature {
            "guide" => Self::GUIDE,
            "report" => Self::REPORT,
            "firewall" => Self::FIREWALL,
            "notifications" => Self::NOTIFICATIONS,
            _ => Self::NOTIFICATIONS,
        }
    }
}

pub use storage::CacheStorage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_for_known_features() {
        assert_eq!(CacheTtl::for_feature("guide"), CacheTtl::GUIDE);
        assert_eq!(CacheTtl::for_feature("report"), CacheTtl::REPORT);
        assert_eq!(CacheTtl::for_feature("firewall"), CacheTtl::FIREWALL);
    }

    #[test]
    fn test_ttl_for_unknown_feature_is_short() {
        assert_eq!(CacheTtl::for_feature("mystery"), CacheTtl::NOTIFICATIONS);
    }
}
