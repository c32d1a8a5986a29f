//! SSH Guardian API client

use async_trait::async_trait;

use crate::error::Result;

use models::{FirewallState, GuideContent, NotificationRecord, ReportContent};

pub mod guardian;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use guardian::GuardianClient;
#[cfg(test)]
pub use mock::MockGuardianClient;

/// Guardian API client trait
///
/// Every endpoint wraps its payload in `{success, data?, error?}`; the
/// implementations unwrap that envelope and surface `success: false` as
/// [`crate::error::ApiError::Backend`], never as data.
#[async_trait]
pub trait GuardianApi: Send + Sync {
    /// Fetch the onboarding guide content
    async fn fetch_guide(&self) -> Result<GuideContent>;

    /// Fetch the thesis/report content
    async fn fetch_report(&self) -> Result<ReportContent>;

    /// Fetch the current firewall state
    async fn fetch_firewall(&self) -> Result<FirewallState>;

    /// List notification history, newest first
    async fn list_notifications(&self) -> Result<Vec<NotificationRecord>>;
}
