//! Notification display models and helpers

use serde::Serialize;
use tabled::Tabled;

use super::common::{dash, format_relative_time};
use crate::client::models::NotificationRecord;
use crate::notify;

/// Notification display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NotificationDisplay {
    /// When the notification was sent (e.g., "2h ago")
    #[tabled(rename = "TIME")]
    pub time: String,

    /// Derived category
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    /// Notification subject
    #[tabled(rename = "SUBJECT")]
    pub subject: String,

    /// Delivery channels (e.g., "email, telegram")
    #[tabled(rename = "CHANNELS")]
    pub channels: String,
}

impl From<NotificationRecord> for NotificationDisplay {
    fn from(record: NotificationRecord) -> Self {
        let category = notify::classify(&record).to_string();
        Self {
            time: record
                .created_at
                .map(format_relative_time)
                .unwrap_or_else(dash),
            category,
            subject: if record.subject.is_empty() {
                dash()
            } else {
                record.subject
            },
            channels: if record.channels.is_empty() {
                dash()
            } else {
                record.channels.join(", ")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_derives_category_per_render() {
        let record = NotificationRecord {
            id: None,
            subject: "IP blocked".to_string(),
            message: String::new(),
            is_security_alert: false,
            channels: vec!["email".to_string(), "telegram".to_string()],
            created_at: None,
        };

        let display = NotificationDisplay::from(record);
        assert_eq!(display.category, "blocking");
        assert_eq!(display.channels, "email, telegram");
        assert_eq!(display.time, "--");
    }
}
