//! Firewall display models and helpers

use serde::Serialize;
use tabled::Tabled;

use super::common::{dash, format_relative_time};
use crate::client::models::FirewallRule;

/// Firewall rule display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FirewallRuleDisplay {
    /// Source address
    #[tabled(rename = "IP")]
    pub ip: String,

    /// Rule action (block/allow)
    #[tabled(rename = "ACTION")]
    pub action: String,

    /// Why the rule was added
    #[tabled(rename = "REASON")]
    pub reason: String,

    /// When the rule was added (e.g., "2h ago")
    #[tabled(rename = "ADDED")]
    pub added: String,
}

impl From<FirewallRule> for FirewallRuleDisplay {
    fn from(rule: FirewallRule) -> Self {
        Self {
            ip: rule.ip,
            action: rule.action.to_uppercase(),
            reason: rule.reason.unwrap_or_else(dash),
            added: rule.added_at.map(format_relative_time).unwrap_or_else(dash),
        }
    }
}
