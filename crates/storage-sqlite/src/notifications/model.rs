//! Database models for notifications.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::notifications::{Notification, NotificationKind};

/// Database model for notifications.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            kind: NotificationKind::parse(&db.kind).unwrap_or(NotificationKind::Info),
            id: db.id,
            user_id: db.user_id,
            message: db.message,
            is_read: db.is_read,
            created_at: db.created_at,
        }
    }
}

impl From<Notification> for NotificationDB {
    fn from(domain: Notification) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            message: domain.message,
            kind: domain.kind.as_str().to_string(),
            is_read: domain.is_read,
            created_at: domain.created_at,
        }
    }
}
