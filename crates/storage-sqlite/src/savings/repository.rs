use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::SavingsPlanDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::savings_plans;
use nestegg_core::errors::{Error, Result};
use nestegg_core::savings::{SavingsPlan, SavingsPlanRepositoryTrait};

pub struct SavingsPlanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SavingsPlanRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SavingsPlanRepository { pool, writer }
    }
}

#[async_trait]
impl SavingsPlanRepositoryTrait for SavingsPlanRepository {
    fn list(&self, user_id: &str) -> Result<Vec<SavingsPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_plans::table
            .filter(savings_plans::user_id.eq(user_id))
            .order(savings_plans::category.asc())
            .load::<SavingsPlanDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(SavingsPlan::from).collect())
    }

    fn get(&self, user_id: &str, plan_id: &str) -> Result<SavingsPlan> {
        let mut conn = get_connection(&self.pool)?;
        let row = savings_plans::table
            .filter(savings_plans::id.eq(plan_id))
            .filter(savings_plans::user_id.eq(user_id))
            .first::<SavingsPlanDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Saving plan '{}'", plan_id)))?;
        Ok(SavingsPlan::from(row))
    }

    fn find_by_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<SavingsPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let row = savings_plans::table
            .filter(savings_plans::goal_id.eq(goal_id))
            .filter(savings_plans::user_id.eq(user_id))
            .first::<SavingsPlanDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(SavingsPlan::from))
    }

    async fn insert(&self, plan: SavingsPlan) -> Result<SavingsPlan> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsPlan> {
                let plan_db = SavingsPlanDB::from(plan);
                let result_db = diesel::insert_into(savings_plans::table)
                    .values(&plan_db)
                    .returning(SavingsPlanDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SavingsPlan::from(result_db))
            })
            .await
    }

    async fn update(&self, plan: SavingsPlan) -> Result<SavingsPlan> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsPlan> {
                let plan_db = SavingsPlanDB::from(plan);
                let affected = diesel::update(
                    savings_plans::table
                        .filter(savings_plans::id.eq(&plan_db.id))
                        .filter(savings_plans::user_id.eq(&plan_db.user_id)),
                )
                .set(&plan_db)
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Saving plan '{}'", plan_db.id)));
                }
                Ok(SavingsPlan::from(plan_db))
            })
            .await
    }

    async fn delete(&self, user_id: &str, plan_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let plan_id = plan_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    savings_plans::table
                        .filter(savings_plans::id.eq(&plan_id))
                        .filter(savings_plans::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
