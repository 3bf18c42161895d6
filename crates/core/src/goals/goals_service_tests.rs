//! Tests for goal orchestration against in-memory repositories.

#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountRepositoryTrait, AccountType};
    use crate::errors::{Error, Result};
    use crate::goals::{
        derive_contribution, ContributionPosting, Goal, GoalRepositoryTrait, GoalService,
        GoalServiceTrait, GoalUpdate, LinkedPlanSync, NewContribution, NewGoal, SavingStrategy,
    };
    use crate::notifications::Notification;
    use crate::savings::SavingsPlan;
    use crate::transactions::{Transaction, TransactionKind};
    use async_trait::async_trait;
    use chrono::{Days, Months, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const USER: &str = "user-1";

    // --- In-memory store implementing both repository traits ---

    #[derive(Default)]
    struct MockStore {
        goals: Mutex<HashMap<String, Goal>>,
        plans: Mutex<HashMap<String, SavingsPlan>>,
        accounts: Mutex<HashMap<String, Account>>,
        transactions: Mutex<Vec<Transaction>>,
        notifications: Mutex<Vec<Notification>>,
    }

    impl MockStore {
        fn plan_for_goal(&self, goal_id: &str) -> Option<SavingsPlan> {
            self.plans
                .lock()
                .unwrap()
                .values()
                .find(|p| p.goal_id.as_deref() == Some(goal_id))
                .cloned()
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockStore {
        fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
            Ok(self
                .goals
                .lock()
                .unwrap()
                .values()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
            self.goals
                .lock()
                .unwrap()
                .get(goal_id)
                .filter(|g| g.user_id == user_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Goal '{}'", goal_id)))
        }

        async fn insert_with_plan(&self, goal: Goal, plan: Option<SavingsPlan>) -> Result<Goal> {
            if let Some(plan) = plan {
                self.plans.lock().unwrap().insert(plan.id.clone(), plan);
            }
            self.goals
                .lock()
                .unwrap()
                .insert(goal.id.clone(), goal.clone());
            Ok(goal)
        }

        async fn update_with_plan(&self, goal: Goal, plan_sync: LinkedPlanSync) -> Result<Goal> {
            match plan_sync {
                LinkedPlanSync::Upsert(candidate) => {
                    let mut plans = self.plans.lock().unwrap();
                    let existing = plans
                        .values()
                        .find(|p| p.goal_id.as_deref() == Some(goal.id.as_str()))
                        .map(|p| p.id.clone());
                    match existing {
                        Some(plan_id) => {
                            let plan = plans.get_mut(&plan_id).unwrap();
                            plan.amount = candidate.amount;
                            plan.updated_at = candidate.updated_at;
                        }
                        None => {
                            plans.insert(candidate.id.clone(), candidate);
                        }
                    }
                }
                LinkedPlanSync::Remove => {
                    self.plans
                        .lock()
                        .unwrap()
                        .retain(|_, p| p.goal_id.as_deref() != Some(goal.id.as_str()));
                }
            }
            self.goals
                .lock()
                .unwrap()
                .insert(goal.id.clone(), goal.clone());
            Ok(goal)
        }

        async fn delete_with_plan(&self, user_id: &str, goal_id: &str) -> Result<usize> {
            let removed = self
                .goals
                .lock()
                .unwrap()
                .remove(goal_id)
                .filter(|g| g.user_id == user_id)
                .map(|_| 1)
                .unwrap_or(0);
            self.plans
                .lock()
                .unwrap()
                .retain(|_, p| p.goal_id.as_deref() != Some(goal_id));
            Ok(removed)
        }

        async fn apply_contribution(&self, posting: ContributionPosting) -> Result<()> {
            // All-or-nothing contract: verify every target row before
            // mutating anything, like the real transaction does.
            let plan_id = match posting.plan_spent_delta {
                Some(_) => Some(
                    self.plan_for_goal(&posting.goal_id)
                        .map(|p| p.id)
                        .ok_or_else(|| {
                            Error::NotFound(format!(
                                "Saving plan for goal '{}'",
                                posting.goal_id
                            ))
                        })?,
                ),
                None => None,
            };

            {
                let mut goals = self.goals.lock().unwrap();
                let goal = goals
                    .get_mut(&posting.goal_id)
                    .ok_or_else(|| Error::NotFound(format!("Goal '{}'", posting.goal_id)))?;
                goal.current_amount = posting.new_current_amount;
            }
            {
                let mut accounts = self.accounts.lock().unwrap();
                let account = accounts
                    .get_mut(&posting.account_id)
                    .ok_or_else(|| Error::NotFound(format!("Account '{}'", posting.account_id)))?;
                account.balance = posting.new_account_balance;
            }
            if let (Some(delta), Some(plan_id)) = (posting.plan_spent_delta, plan_id) {
                let mut plans = self.plans.lock().unwrap();
                let plan = plans.get_mut(&plan_id).unwrap();
                plan.spent += delta;
            }
            self.transactions.lock().unwrap().push(posting.transaction);
            self.notifications
                .lock()
                .unwrap()
                .extend(posting.notifications);
            Ok(())
        }
    }

    #[async_trait]
    impl AccountRepositoryTrait for MockStore {
        fn list(&self, user_id: &str) -> Result<Vec<Account>> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get(&self, user_id: &str, account_id: &str) -> Result<Account> {
            self.accounts
                .lock()
                .unwrap()
                .get(account_id)
                .filter(|a| a.user_id == user_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Account '{}'", account_id)))
        }

        async fn insert(&self, account: Account) -> Result<Account> {
            self.accounts
                .lock()
                .unwrap()
                .insert(account.id.clone(), account.clone());
            Ok(account)
        }

        async fn update(&self, account: Account) -> Result<Account> {
            self.accounts
                .lock()
                .unwrap()
                .insert(account.id.clone(), account.clone());
            Ok(account)
        }

        async fn delete(&self, _user_id: &str, account_id: &str) -> Result<usize> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .remove(account_id)
                .map(|_| 1)
                .unwrap_or(0))
        }
    }

    // --- Helpers ---

    fn build_service() -> (Arc<MockStore>, GoalService) {
        let store = Arc::new(MockStore::default());
        let service = GoalService::new(store.clone(), store.clone());
        (store, service)
    }

    fn seed_account(store: &MockStore, balance: Decimal) -> String {
        let now = Utc::now().naive_utc();
        let account = Account {
            id: "acct-1".to_string(),
            user_id: USER.to_string(),
            name: "Checking".to_string(),
            account_type: AccountType::Bank,
            balance,
            bank_name: None,
            currency: Some("USD".to_string()),
            created_at: now,
            updated_at: now,
        };
        let id = account.id.clone();
        store
            .accounts
            .lock()
            .unwrap()
            .insert(account.id.clone(), account);
        id
    }

    fn deadline_in_months(months: u32) -> NaiveDate {
        Utc::now()
            .date_naive()
            .checked_add_months(Months::new(months))
            .unwrap()
    }

    fn deadline_goal(target: Decimal, current: Decimal, months_out: u32) -> NewGoal {
        NewGoal {
            name: "New Laptop".to_string(),
            target_amount: target,
            current_amount: current,
            saving_strategy: SavingStrategy::Monthly,
            target_date: Some(deadline_in_months(months_out)),
            periodic_contribution: None,
        }
    }

    // --- Creation ---

    #[tokio::test]
    async fn structured_goal_gets_a_derived_contribution_and_a_linked_plan() {
        let (store, service) = build_service();
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();

        let expected = derive_contribution(
            dec!(1200),
            dec!(0),
            SavingStrategy::Monthly,
            goal.target_date.unwrap(),
            Utc::now().date_naive(),
        );
        assert_eq!(goal.periodic_contribution, expected);
        assert!(goal.periodic_contribution > Decimal::ZERO);

        let plan = store.plan_for_goal(&goal.id).expect("linked plan");
        assert_eq!(plan.category, format!("Goal: {}", goal.name));
        assert_eq!(plan.amount, goal.periodic_contribution);
        assert_eq!(plan.spent, Decimal::ZERO);
        assert!(plan.is_goal);
    }

    #[tokio::test]
    async fn contribution_driven_goal_projects_its_target_date() {
        let (_, service) = build_service();
        let goal = service
            .create_goal(
                USER,
                NewGoal {
                    name: "Emergency Fund".to_string(),
                    target_amount: dec!(1000),
                    current_amount: dec!(200),
                    saving_strategy: SavingStrategy::Weekly,
                    target_date: None,
                    periodic_contribution: Some(dec!(100)),
                },
            )
            .await
            .unwrap();

        assert_eq!(goal.periodic_contribution, dec!(100));
        let expected = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(8 * 7))
            .unwrap();
        assert_eq!(goal.target_date, Some(expected));
    }

    #[tokio::test]
    async fn self_dependent_goal_never_gets_a_plan() {
        let (store, service) = build_service();
        let goal = service
            .create_goal(
                USER,
                NewGoal {
                    name: "Someday Boat".to_string(),
                    target_amount: dec!(5000),
                    current_amount: dec!(100),
                    saving_strategy: SavingStrategy::SelfDependent,
                    target_date: None,
                    periodic_contribution: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(goal.periodic_contribution, Decimal::ZERO);
        assert_eq!(goal.target_date, None);
        assert!(store.plans.lock().unwrap().is_empty());

        let projection = service.project_completion(USER, &goal.id).unwrap();
        assert_eq!(projection.projected_date, None);
    }

    #[tokio::test]
    async fn creation_validates_its_inputs() {
        let (_, service) = build_service();

        let mut short_name = deadline_goal(dec!(100), dec!(0), 6);
        short_name.name = "x".to_string();
        assert!(matches!(
            service.create_goal(USER, short_name).await,
            Err(Error::Validation(_))
        ));

        let over_saved = deadline_goal(dec!(100), dec!(150), 6);
        assert!(matches!(
            service.create_goal(USER, over_saved).await,
            Err(Error::Validation(_))
        ));

        let mut past_deadline = deadline_goal(dec!(100), dec!(0), 6);
        past_deadline.target_date = Some(
            Utc::now()
                .date_naive()
                .checked_sub_days(Days::new(1))
                .unwrap(),
        );
        assert!(matches!(
            service.create_goal(USER, past_deadline).await,
            Err(Error::Validation(_))
        ));
    }

    // --- Update ---

    #[tokio::test]
    async fn update_rejects_a_changed_name() {
        let (_, service) = build_service();
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();

        let result = service
            .update_goal(
                USER,
                &goal.id,
                GoalUpdate {
                    name: Some("Different Name".to_string()),
                    target_amount: dec!(1200),
                    current_amount: dec!(0),
                    saving_strategy: SavingStrategy::Monthly,
                    target_date: goal.target_date,
                    periodic_contribution: None,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_resyncs_the_linked_plan_amount() {
        let (store, service) = build_service();
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();
        let original_plan = store.plan_for_goal(&goal.id).unwrap();

        let updated = service
            .update_goal(
                USER,
                &goal.id,
                GoalUpdate {
                    name: None,
                    target_amount: dec!(2400),
                    current_amount: dec!(0),
                    saving_strategy: SavingStrategy::Monthly,
                    target_date: goal.target_date,
                    periodic_contribution: None,
                },
            )
            .await
            .unwrap();

        let plan = store.plan_for_goal(&goal.id).unwrap();
        assert_eq!(plan.id, original_plan.id);
        assert_eq!(plan.amount, updated.periodic_contribution);
        assert!(plan.amount > original_plan.amount);
    }

    #[tokio::test]
    async fn switching_to_self_dependent_removes_the_plan() {
        let (store, service) = build_service();
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();
        assert!(store.plan_for_goal(&goal.id).is_some());

        service
            .update_goal(
                USER,
                &goal.id,
                GoalUpdate {
                    name: None,
                    target_amount: dec!(1200),
                    current_amount: dec!(0),
                    saving_strategy: SavingStrategy::SelfDependent,
                    target_date: None,
                    periodic_contribution: None,
                },
            )
            .await
            .unwrap();
        assert!(store.plan_for_goal(&goal.id).is_none());
    }

    // --- Contributions ---

    #[tokio::test]
    async fn contribution_moves_funds_and_records_everything() {
        let (store, service) = build_service();
        let account_id = seed_account(&store, dec!(500));
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();

        let outcome = service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(100),
                    account_id: account_id.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.goal.current_amount, dec!(100));
        assert_eq!(outcome.account_balance, dec!(400));
        assert!(!outcome.reached);

        let stored_goal = store.goals.lock().unwrap().get(&goal.id).cloned().unwrap();
        assert!(stored_goal.current_amount >= Decimal::ZERO);
        assert!(stored_goal.current_amount <= stored_goal.target_amount);
        assert_eq!(stored_goal.current_amount, dec!(100));

        let account = store
            .accounts
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .unwrap();
        assert_eq!(account.balance, dec!(400));

        let plan = store.plan_for_goal(&goal.id).unwrap();
        assert_eq!(plan.spent, dec!(100));

        let transactions = store.transactions.lock().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].category, "Savings");
        assert_eq!(transactions[0].amount, dec!(100));

        assert_eq!(store.notifications.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contribution_fails_on_insufficient_funds() {
        let (store, service) = build_service();
        let account_id = seed_account(&store, dec!(50));
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();

        let result = service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(100),
                    account_id: account_id.clone(),
                },
            )
            .await;
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));

        // Nothing moved.
        let stored_goal = store.goals.lock().unwrap().get(&goal.id).cloned().unwrap();
        assert_eq!(stored_goal.current_amount, Decimal::ZERO);
        let account = store
            .accounts
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .unwrap();
        assert_eq!(account.balance, dec!(50));
        assert!(store.transactions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn overshooting_contribution_clamps_and_reaches() {
        let (store, service) = build_service();
        let account_id = seed_account(&store, dec!(500));
        let goal = service
            .create_goal(USER, deadline_goal(dec!(100), dec!(90), 12))
            .await
            .unwrap();

        let outcome = service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(50),
                    account_id: account_id.clone(),
                },
            )
            .await
            .unwrap();

        assert!(outcome.reached);
        assert_eq!(outcome.goal.current_amount, dec!(100));
        // Only the 10 the goal could absorb left the account.
        assert_eq!(outcome.account_balance, dec!(490));

        let transactions = store.transactions.lock().unwrap();
        assert_eq!(transactions[0].amount, dec!(10));
        // Contribution summary plus goal-reached notice.
        assert_eq!(store.notifications.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reached_goals_accept_no_further_contributions() {
        let (store, service) = build_service();
        let account_id = seed_account(&store, dec!(500));
        let goal = service
            .create_goal(USER, deadline_goal(dec!(100), dec!(90), 12))
            .await
            .unwrap();
        service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(10),
                    account_id: account_id.clone(),
                },
            )
            .await
            .unwrap();

        let result = service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(10),
                    account_id,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn missing_linked_plan_fails_the_whole_contribution() {
        let (store, service) = build_service();
        let account_id = seed_account(&store, dec!(500));
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();
        store.plans.lock().unwrap().clear();

        let result = service
            .contribute(
                USER,
                &goal.id,
                NewContribution {
                    amount: dec!(100),
                    account_id: account_id.clone(),
                },
            )
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let stored_goal = store.goals.lock().unwrap().get(&goal.id).cloned().unwrap();
        assert_eq!(stored_goal.current_amount, Decimal::ZERO);
        let account = store
            .accounts
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .unwrap();
        assert_eq!(account.balance, dec!(500));
    }

    // --- Deletion ---

    #[tokio::test]
    async fn deleting_a_goal_cascades_to_its_plan() {
        let (store, service) = build_service();
        let goal = service
            .create_goal(USER, deadline_goal(dec!(1200), dec!(0), 12))
            .await
            .unwrap();
        assert!(store.plan_for_goal(&goal.id).is_some());

        service.delete_goal(USER, &goal.id).await.unwrap();

        assert!(store.goals.lock().unwrap().is_empty());
        assert!(store.plans.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_goal_is_not_found() {
        let (_, service) = build_service();
        assert!(matches!(
            service.delete_goal(USER, "nope").await,
            Err(Error::NotFound(_))
        ));
    }
}
