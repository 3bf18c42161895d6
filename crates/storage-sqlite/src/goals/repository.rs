use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::notifications::NotificationDB;
use crate::savings::SavingsPlanDB;
use crate::schema::{accounts, goals, notifications, savings_plans, transactions};
use crate::transactions::TransactionDB;
use nestegg_core::errors::{Error, Result};
use nestegg_core::goals::{ContributionPosting, Goal, GoalRepositoryTrait, LinkedPlanSync};
use nestegg_core::savings::SavingsPlan;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_plan_for_goal(
    conn: &mut SqliteConnection,
    user_id: &str,
    goal_id: &str,
) -> Result<Option<SavingsPlanDB>> {
    Ok(savings_plans::table
        .filter(savings_plans::goal_id.eq(goal_id))
        .filter(savings_plans::user_id.eq(user_id))
        .first::<SavingsPlanDB>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Goal '{}'", goal_id)))?;
        Ok(Goal::from(row))
    }

    async fn insert_with_plan(&self, goal: Goal, plan: Option<SavingsPlan>) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db = GoalDB::from(goal);
                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                if let Some(plan) = plan {
                    let plan_db = SavingsPlanDB::from(plan);
                    diesel::insert_into(savings_plans::table)
                        .values(&plan_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_with_plan(&self, goal: Goal, plan_sync: LinkedPlanSync) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db = GoalDB::from(goal);
                let affected = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_db.id))
                        .filter(goals::user_id.eq(&goal_db.user_id)),
                )
                .set(&goal_db)
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Goal '{}'", goal_db.id)));
                }

                match plan_sync {
                    LinkedPlanSync::Upsert(candidate) => {
                        match find_plan_for_goal(conn, &goal_db.user_id, &goal_db.id)? {
                            Some(existing) => {
                                diesel::update(
                                    savings_plans::table.filter(savings_plans::id.eq(&existing.id)),
                                )
                                .set((
                                    savings_plans::amount.eq(&goal_db.periodic_contribution),
                                    savings_plans::updated_at.eq(Utc::now().naive_utc()),
                                ))
                                .execute(conn)
                                .map_err(StorageError::from)?;
                            }
                            None => {
                                let plan_db = SavingsPlanDB::from(candidate);
                                diesel::insert_into(savings_plans::table)
                                    .values(&plan_db)
                                    .execute(conn)
                                    .map_err(StorageError::from)?;
                            }
                        }
                    }
                    LinkedPlanSync::Remove => {
                        diesel::delete(
                            savings_plans::table
                                .filter(savings_plans::goal_id.eq(&goal_db.id))
                                .filter(savings_plans::user_id.eq(&goal_db.user_id)),
                        )
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    }
                }
                Ok(Goal::from(goal_db))
            })
            .await
    }

    async fn delete_with_plan(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Plan first: its goal_id references the goal row.
                diesel::delete(
                    savings_plans::table
                        .filter(savings_plans::goal_id.eq(&goal_id))
                        .filter(savings_plans::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn apply_contribution(&self, posting: ContributionPosting) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let now = Utc::now().naive_utc();

                let affected = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&posting.goal_id))
                        .filter(goals::user_id.eq(&posting.user_id)),
                )
                .set((
                    goals::current_amount.eq(posting.new_current_amount.to_string()),
                    goals::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Goal '{}'", posting.goal_id)));
                }

                let affected = diesel::update(
                    accounts::table
                        .filter(accounts::id.eq(&posting.account_id))
                        .filter(accounts::user_id.eq(&posting.user_id)),
                )
                .set((
                    accounts::balance.eq(posting.new_account_balance.to_string()),
                    accounts::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Account '{}'", posting.account_id)));
                }

                if let Some(delta) = posting.plan_spent_delta {
                    let plan = find_plan_for_goal(conn, &posting.user_id, &posting.goal_id)?
                        .ok_or_else(|| {
                            Error::NotFound(format!("Saving plan for goal '{}'", posting.goal_id))
                        })?;
                    let new_spent = plan.spent_decimal() + delta;
                    diesel::update(savings_plans::table.filter(savings_plans::id.eq(&plan.id)))
                        .set((
                            savings_plans::spent.eq(new_spent.to_string()),
                            savings_plans::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                let transaction_db = TransactionDB::from(posting.transaction);
                diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let notification_dbs: Vec<NotificationDB> = posting
                    .notifications
                    .into_iter()
                    .map(NotificationDB::from)
                    .collect();
                diesel::insert_into(notifications::table)
                    .values(&notification_dbs)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(())
            })
            .await
    }
}
