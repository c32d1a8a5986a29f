//! Display models for table/JSON output

pub mod common;
pub mod firewall;
pub mod notification;

pub use firewall::FirewallRuleDisplay;
pub use notification::NotificationDisplay;
