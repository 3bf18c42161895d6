use async_trait::async_trait;
use std::sync::Arc;

use super::notifications_model::Notification;
use super::notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::errors::{Error, Result};

/// Service for user-facing notifications.
pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>) -> Self {
        NotificationService { repository }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.repository.list(user_id)
    }

    async fn notify(&self, notification: Notification) -> Result<Notification> {
        self.repository.insert(notification).await
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<()> {
        let affected = self.repository.mark_read(user_id, notification_id).await?;
        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Notification '{}'",
                notification_id
            )));
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<()> {
        self.repository.mark_all_read(user_id).await?;
        Ok(())
    }
}
