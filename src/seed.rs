//! Demo data
//!
//! Two users with three funded accounts each, for local development.

use crate::domain::Currency;
use crate::store::{
    CreateAccountParams, CreateUserParams, ListAccountsParams, Store, StoreError,
};

/// Opening balance of every seeded account, in minor units
pub const SEED_BALANCE: i64 = 100;

struct SeedUser {
    username: &'static str,
    full_name: &'static str,
    email: &'static str,
    currencies: [Currency; 3],
}

static SEED_USERS: [SeedUser; 2] = [
    SeedUser {
        username: "peepo",
        full_name: "Apu Apustaja",
        email: "apu@apustaja.com",
        currencies: [Currency::Usd, Currency::Gbp, Currency::Eur],
    },
    SeedUser {
        username: "gondola",
        full_name: "Gondola Gondolier",
        email: "gondola@example.com",
        currencies: [Currency::Usd, Currency::Eur, Currency::Cad],
    },
];

/// Insert the demo users and accounts in one transaction.
///
/// Rows that already exist are left alone, so running it twice is harmless.
/// Returns the number of accounts created.
pub async fn seed(store: &Store) -> Result<usize, StoreError> {
    let created = store
        .exec_tx(|mut q| {
            Box::pin(async move {
                let mut created: usize = 0;

                for user in &SEED_USERS {
                    if q.get_user(user.username).await?.is_none() {
                        q.create_user(&CreateUserParams {
                            username: user.username.to_string(),
                            full_name: user.full_name.to_string(),
                            email: user.email.to_string(),
                        })
                        .await?;
                    }

                    let existing = q
                        .list_accounts(&ListAccountsParams {
                            owner: user.username.to_string(),
                            limit: Currency::ALL.len() as i64,
                            offset: 0,
                        })
                        .await?;

                    for currency in user.currencies {
                        if existing.iter().any(|a| a.currency == currency) {
                            continue;
                        }
                        q.create_account(&CreateAccountParams {
                            owner: user.username.to_string(),
                            balance: SEED_BALANCE,
                            currency,
                        })
                        .await?;
                        created += 1;
                    }
                }

                Ok::<_, StoreError>(created)
            })
        })
        .await?;

    tracing::info!(accounts_created = created, "Database seeded");
    Ok(created)
}
