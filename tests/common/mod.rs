//! Common test utilities

#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;

use simple_bank::store::{CreateAccountParams, CreateUserParams};
use simple_bank::{Account, Currency, Store, User};

/// Connect to the test database and bring the schema up to date.
///
/// Tables are not truncated; every test works on freshly created users and
/// accounts so tests can run in parallel against one database.
pub async fn setup_test_db() -> Store {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Store::new(pool)
}

pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

pub fn random_owner() -> String {
    format!("user_{}", random_string(10))
}

pub async fn create_random_user(store: &Store) -> User {
    let username = random_owner();
    store
        .create_user(&CreateUserParams {
            username: username.clone(),
            full_name: format!("Test {}", username),
            email: format!("{}@example.com", username),
        })
        .await
        .expect("Failed to create user")
}

/// New account under a new owner, opened with `balance`
pub async fn create_random_account(store: &Store, balance: i64, currency: Currency) -> Account {
    let user = create_random_user(store).await;
    store
        .create_account(&CreateAccountParams {
            owner: user.username,
            balance,
            currency,
        })
        .await
        .expect("Failed to create account")
}

/// Current balance, panicking if the account vanished
pub async fn balance_of(store: &Store, account_id: i64) -> i64 {
    store
        .get_account(account_id)
        .await
        .expect("Failed to load account")
        .expect("Account should exist")
        .balance
}
