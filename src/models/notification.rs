use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style message for the UI.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: i64, // timestamp in milliseconds
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message.into())
    }

    fn new(level: NotificationLevel, message: String) -> Self {
        Self {
            level,
            message,
            at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
