use crate::errors::Result;
use crate::notifications::notifications_model::Notification;
use async_trait::async_trait;

/// Trait for notification repository operations
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Notification>>;
    async fn insert(&self, notification: Notification) -> Result<Notification>;
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<usize>;
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
    async fn notify(&self, notification: Notification) -> Result<Notification>;
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<()>;
    async fn mark_all_read(&self, user_id: &str) -> Result<()>;
}
