use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::NotificationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::notifications;
use nestegg_core::errors::Result;
use nestegg_core::notifications::{Notification, NotificationRepositoryTrait};

pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        NotificationRepository { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .order(notifications::created_at.desc())
            .load::<NotificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn insert(&self, notification: Notification) -> Result<Notification> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                let notification_db = NotificationDB::from(notification);
                let result_db = diesel::insert_into(notifications::table)
                    .values(&notification_db)
                    .returning(NotificationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Notification::from(result_db))
            })
            .await
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    notifications::table
                        .filter(notifications::id.eq(&notification_id))
                        .filter(notifications::user_id.eq(&user_id)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(&user_id))
                        .filter(notifications::is_read.eq(false)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
