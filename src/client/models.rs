//! Guardian API payload models
//!
//! All backend response shapes are normalized here, at the collaborator
//! boundary, so the rest of the crate only ever sees one canonical form of
//! each record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One step of the onboarding guide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideStep {
    /// 1-based ordinal within the guide
    pub step_number: u32,

    /// Step heading
    pub title: String,

    /// Short sub-heading
    #[serde(default)]
    pub subtitle: String,

    /// Step body (HTML from the backend; rendered as plain text here)
    #[serde(default, alias = "content_html")]
    pub content: String,

    /// Optional tip callout
    #[serde(default, alias = "tips_html")]
    pub tip: Option<String>,
}

/// Onboarding guide content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideContent {
    pub steps: Vec<GuideStep>,

    /// Backends older than 1.4 omit this; derive it from the step list
    #[serde(default)]
    pub total_steps: Option<u32>,
}

impl GuideContent {
    /// Step count, preferring the explicit field when present
    pub fn step_count(&self) -> usize {
        self.total_steps
            .map(|n| n as usize)
            .unwrap_or(self.steps.len())
    }
}

/// Report/thesis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Table-of-contents entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(default)]
    pub id: Option<String>,

    pub title: String,
}

/// One report section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default)]
    pub id: Option<String>,

    pub title: String,

    #[serde(default, alias = "body_html")]
    pub body: String,
}

/// Full report/thesis content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportContent {
    pub metadata: ReportMetadata,

    #[serde(default)]
    pub toc: Vec<TocEntry>,

    #[serde(default)]
    pub sections: Vec<ReportSection>,
}

/// One firewall rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    /// Blocked or allowed address
    #[serde(alias = "ip_address")]
    pub ip: String,

    /// "block" or "allow"
    #[serde(default = "default_action")]
    pub action: String,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

fn default_action() -> String {
    "block".to_string()
}

/// Firewall state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallState {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub rules: Vec<FirewallRule>,
}

impl FirewallState {
    /// Normalize the two shapes the backend has been observed to return:
    /// `{enabled, rules: [...]}` and a bare `[...]` rule array.
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        if value.is_array() {
            let rules: Vec<FirewallRule> = serde_json::from_value(value)?;
            return Ok(FirewallState {
                enabled: true,
                rules,
            });
        }
        serde_json::from_value(value)
    }
}

/// Notification history record
///
/// Read-only from this layer's perspective; the derived category is computed
/// per render by [`crate::notify::classify`], never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub message: String,

    /// Set by the server for ML-flagged security events
    #[serde(default, alias = "isSecurityAlert")]
    pub is_security_alert: bool,

    /// Some backend versions call this `notification_channels`
    #[serde(default, alias = "notification_channels")]
    pub channels: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
