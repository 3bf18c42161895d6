//! End-to-end goal lifecycle tests against a real SQLite database.

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal_macros::dec;
use tempfile::TempDir;

use nestegg_core::accounts::{
    AccountService, AccountServiceTrait, AccountType, NewAccount,
};
use nestegg_core::errors::Error;
use nestegg_core::goals::{
    GoalService, GoalServiceTrait, NewContribution, NewGoal, SavingStrategy,
};
use nestegg_core::notifications::NotificationRepositoryTrait;
use nestegg_core::savings::{
    SavingsPlanService, SavingsPlanServiceTrait, SavingsPlanUpdate,
};
use nestegg_core::transactions::{
    NewTransaction, TransactionKind, TransactionService, TransactionServiceTrait,
};
use nestegg_storage_sqlite::accounts::AccountRepository;
use nestegg_storage_sqlite::goals::GoalRepository;
use nestegg_storage_sqlite::notifications::NotificationRepository;
use nestegg_storage_sqlite::savings::SavingsPlanRepository;
use nestegg_storage_sqlite::transactions::TransactionRepository;
use nestegg_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

const USER: &str = "test-user";

struct TestEnv {
    _tmp: TempDir,
    accounts: AccountService,
    goals: GoalService,
    plans: SavingsPlanService,
    transactions: TransactionService,
    notifications: Arc<NotificationRepository>,
}

fn setup() -> TestEnv {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.as_ref().clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let plan_repo = Arc::new(SavingsPlanRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));

    TestEnv {
        _tmp: tmp,
        accounts: AccountService::new(account_repo.clone()),
        goals: GoalService::new(goal_repo, account_repo.clone()),
        plans: SavingsPlanService::new(plan_repo),
        transactions: TransactionService::new(transaction_repo, account_repo),
        notifications: notification_repo,
    }
}

async fn seed_account(env: &TestEnv, balance: rust_decimal::Decimal) -> String {
    env.accounts
        .create_account(
            USER,
            NewAccount {
                name: "Checking".to_string(),
                account_type: AccountType::Bank,
                balance,
                bank_name: None,
                currency: Some("USD".to_string()),
            },
        )
        .await
        .unwrap()
        .id
}

fn monthly_goal(target: rust_decimal::Decimal) -> NewGoal {
    NewGoal {
        name: "New Laptop".to_string(),
        target_amount: target,
        current_amount: dec!(0),
        saving_strategy: SavingStrategy::Monthly,
        target_date: Some(
            Utc::now()
                .date_naive()
                .checked_add_months(Months::new(12))
                .unwrap(),
        ),
        periodic_contribution: None,
    }
}

#[tokio::test]
async fn goal_lifecycle_creates_contributes_and_cascades() {
    let env = setup();
    let account_id = seed_account(&env, dec!(500)).await;

    let goal = env.goals.create_goal(USER, monthly_goal(dec!(1200))).await.unwrap();
    assert!(goal.periodic_contribution > dec!(0));

    // Linked plan created in the same transaction.
    let plans = env.plans.list_plans(USER).unwrap();
    assert_eq!(plans.len(), 1);
    assert!(plans[0].is_goal);
    assert_eq!(plans[0].goal_id.as_deref(), Some(goal.id.as_str()));
    assert_eq!(plans[0].amount, goal.periodic_contribution);
    assert_eq!(plans[0].category, "Goal: New Laptop");

    // Contribute: all five effects land.
    let outcome = env
        .goals
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
    assert!(!outcome.reached);

    let account = env.accounts.get_account(USER, &account_id).unwrap();
    assert_eq!(account.balance, dec!(400));

    let plans = env.plans.list_plans(USER).unwrap();
    assert_eq!(plans[0].spent, dec!(100));

    let booked = env.transactions.list_transactions(USER, None).unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].category, "Savings");
    assert_eq!(booked[0].kind, TransactionKind::Expense);
    assert_eq!(booked[0].amount, dec!(100));

    let notes = env.notifications.list(USER).unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("New Laptop"));

    // Delete cascades: no orphaned plan remains.
    env.goals.delete_goal(USER, &goal.id).await.unwrap();
    assert!(env.goals.list_goals(USER).unwrap().is_empty());
    assert!(env.plans.list_plans(USER).unwrap().is_empty());
}

#[tokio::test]
async fn failed_contribution_changes_nothing() {
    let env = setup();
    let account_id = seed_account(&env, dec!(50)).await;
    let goal = env.goals.create_goal(USER, monthly_goal(dec!(1200))).await.unwrap();

    let result = env
        .goals
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

    let account = env.accounts.get_account(USER, &account_id).unwrap();
    assert_eq!(account.balance, dec!(50));
    let fresh = env.goals.get_goal(USER, &goal.id).unwrap();
    assert_eq!(fresh.current_amount, dec!(0));
    assert!(env.transactions.list_transactions(USER, None).unwrap().is_empty());
    assert!(env.notifications.list(USER).unwrap().is_empty());
}

#[tokio::test]
async fn goal_linked_plans_resist_direct_mutation() {
    let env = setup();
    let _goal = env.goals.create_goal(USER, monthly_goal(dec!(1200))).await.unwrap();
    let plan = env.plans.list_plans(USER).unwrap().remove(0);

    let update = env
        .plans
        .update_plan(
            USER,
            &plan.id,
            SavingsPlanUpdate {
                category: "Hijacked".to_string(),
                amount: dec!(1),
            },
        )
        .await;
    assert!(matches!(update, Err(Error::GoalLinked(_))));

    let delete = env.plans.delete_plan(USER, &plan.id).await;
    assert!(matches!(delete, Err(Error::GoalLinked(_))));
}

#[tokio::test]
async fn booking_and_deleting_transactions_moves_the_balance() {
    let env = setup();
    let account_id = seed_account(&env, dec!(100)).await;

    let expense = env
        .transactions
        .create_transaction(
            USER,
            NewTransaction {
                date: None,
                description: "Groceries run".to_string(),
                amount: dec!(30),
                kind: TransactionKind::Expense,
                category: "Groceries".to_string(),
                account_id: account_id.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        env.accounts.get_account(USER, &account_id).unwrap().balance,
        dec!(70)
    );

    env.transactions
        .create_transaction(
            USER,
            NewTransaction {
                date: None,
                description: "Paycheck".to_string(),
                amount: dec!(50),
                kind: TransactionKind::Income,
                category: "Income".to_string(),
                account_id: account_id.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        env.accounts.get_account(USER, &account_id).unwrap().balance,
        dec!(120)
    );

    env.transactions
        .delete_transaction(USER, &expense.id)
        .await
        .unwrap();
    assert_eq!(
        env.accounts.get_account(USER, &account_id).unwrap().balance,
        dec!(150)
    );
}

#[tokio::test]
async fn records_are_scoped_per_user() {
    let env = setup();
    let goal = env.goals.create_goal(USER, monthly_goal(dec!(1200))).await.unwrap();

    assert!(env.goals.list_goals("someone-else").unwrap().is_empty());
    assert!(matches!(
        env.goals.get_goal("someone-else", &goal.id),
        Err(Error::NotFound(_))
    ));
}
