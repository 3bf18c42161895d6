//! Notification domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Alert,
    Ai,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Alert => "alert",
            NotificationKind::Ai => "ai",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(NotificationKind::Info),
            "warning" => Some(NotificationKind::Warning),
            "alert" => Some(NotificationKind::Alert),
            "ai" => Some(NotificationKind::Ai),
            _ => None,
        }
    }
}

/// A user-facing notification entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl Notification {
    pub fn new(user_id: &str, message: String, kind: NotificationKind) -> Self {
        Notification {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            message,
            kind,
            is_read: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
