//! Mock Guardian API client for testing
//!
//! Provides a mock implementation of [`GuardianApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{FirewallState, GuideContent, NotificationRecord, ReportContent};
use super::GuardianApi;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
pub struct MockGuardianClient {
    guide: Arc<Mutex<Option<GuideContent>>>,
    report: Arc<Mutex<Option<ReportContent>>>,
    firewall: Arc<Mutex<Option<FirewallState>>>,
    notifications: Arc<Mutex<Vec<NotificationRecord>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub fetch_guide: usize,
    pub fetch_report: usize,
    pub fetch_firewall: usize,
    pub list_notifications: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.fetch_guide + self.fetch_report + self.fetch_firewall + self.list_notifications
    }
}

impl Default for MockGuardianClient {
    fn default() -> Self {
        Self {
            guide: Arc::new(Mutex::new(None)),
            report: Arc::new(Mutex::new(None)),
            firewall: Arc::new(Mutex::new(None)),
            notifications: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockGuardianClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure guide content to return from fetch_guide.
    pub async fn with_guide(self, guide: GuideContent) -> Self {
        *self.guide.lock().await = Some(guide);
        self
    }

    /// Configure report content to return from fetch_report.
    pub async fn with_report(self, report: ReportContent) -> Self {
        *self.report.lock().await = Some(report);
        self
    }

    /// Configure firewall state to return from fetch_firewall.
    pub async fn with_firewall(self, state: FirewallState) -> Self {
        *self.firewall.lock().await = Some(state);
        self
    }

    /// Configure notifications to return from list_notifications.
    pub async fn with_notifications(self, records: Vec<NotificationRecord>) -> Self {
        *self.notifications.lock().await = records;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl GuardianApi for MockGuardianClient {
    async fn fetch_guide(&self) -> Result<GuideContent> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.fetch_guide += 1;
        drop(counts);

        let guide = self.guide.lock().await;
        guide
            .clone()
            .ok_or_else(|| ApiError::NotFound("guide content".to_string()).into())
    }

    async fn fetch_report(&self) -> Result<ReportContent> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.fetch_report += 1;
        drop(counts);

        let report = self.report.lock().await;
        report
            .clone()
            .ok_or_else(|| ApiError::NotFound("report content".to_string()).into())
    }

    async fn fetch_firewall(&self) -> Result<FirewallState> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.fetch_firewall += 1;
        drop(counts);

        let state = self.firewall.lock().await;
        state
            .clone()
            .ok_or_else(|| ApiError::NotFound("firewall state".to_string()).into())
    }

    async fn list_notifications(&self) -> Result<Vec<NotificationRecord>> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.list_notifications += 1;
        drop(counts);

        Ok(self.notifications.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::GuideStep;

    fn one_step_guide() -> GuideContent {
        GuideContent {
            steps: vec![GuideStep {
                step_number: 1,
                title: "Install the agent".to_string(),
                subtitle: String::new(),
                content: "Run the installer on each host.".to_string(),
                tip: None,
            }],
            total_steps: Some(1),
        }
    }

    #[tokio::test]
    async fn test_mock_default_guide_is_not_found() {
        let mock = MockGuardianClient::new();
        assert!(mock.fetch_guide().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_returns_configured_guide() {
        let mock = MockGuardianClient::new().with_guide(one_step_guide()).await;

        let guide = mock.fetch_guide().await.unwrap();
        assert_eq!(guide.steps[0].title, "Install the agent");
    }

    #[tokio::test]
    async fn test_mock_error_is_one_shot() {
        let mock = MockGuardianClient::new()
            .with_guide(one_step_guide())
            .await
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.fetch_guide().await.is_err());
        assert!(mock.fetch_guide().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_call_counts() {
        let mock = MockGuardianClient::new()
            .with_guide(one_step_guide())
            .await
            .with_notifications(vec![])
            .await;

        mock.fetch_guide().await.unwrap();
        mock.fetch_guide().await.unwrap();
        mock.list_notifications().await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.fetch_guide, 2);
        assert_eq!(counts.list_notifications, 1);
        assert_eq!(counts.total(), 3);
    }
}
