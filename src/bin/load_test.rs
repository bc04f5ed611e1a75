//! Transfer Load Test
//!
//! Fires concurrent transfers in alternating directions between two fresh
//! accounts and checks that neither balance drifted.
//!
//! Run with: cargo run --bin load_test --release -- --transfers 1000

use std::time::Instant;

use futures::future::join_all;
use rand::distributions::Alphanumeric;
use rand::Rng;

use simple_bank::store::{CreateAccountParams, CreateUserParams};
use simple_bank::{db, Currency, Store, TransferTxParams};

const OPENING_BALANCE: i64 = 1_000_000;
const AMOUNT: i64 = 10;

fn arg_value(args: &[String], flag: &str) -> Option<u64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let transfer_count = arg_value(&args, "--transfers").unwrap_or(1000);
    let connections = arg_value(&args, "--connections").unwrap_or(10) as u32;

    let database_url = std::env::var("DATABASE_URL")?;

    println!("Load Test - {} concurrent transfers", transfer_count);
    println!("Connecting to database...");

    let pool = db::connect(&database_url, connections).await?;
    db::run_migrations(&pool).await?;
    let store = Store::new(pool);

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let username = format!("load_{}", suffix.to_lowercase());

    store
        .create_user(&CreateUserParams {
            username: username.clone(),
            full_name: "Load Test".to_string(),
            email: format!("{}@load.test", username),
        })
        .await?;

    let mut accounts = Vec::with_capacity(2);
    for currency in [Currency::Usd, Currency::Eur] {
        // (owner, currency) is unique
        accounts.push(
            store
                .create_account(&CreateAccountParams {
                    owner: username.clone(),
                    balance: OPENING_BALANCE,
                    currency,
                })
                .await?,
        );
    }
    let (a, b) = (accounts[0].id, accounts[1].id);

    let start = Instant::now();

    let tasks = (0..transfer_count).map(|i| {
        let store = store.clone();
        let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
        tokio::spawn(async move {
            store
                .transfer_tx(TransferTxParams {
                    from_account_id: from,
                    to_account_id: to,
                    amount: AMOUNT,
                })
                .await
        })
    });

    let mut success_count = 0u64;
    let mut failures = 0u64;
    for outcome in join_all(tasks).await {
        match outcome? {
            Ok(_) => success_count += 1,
            Err(e) => {
                failures += 1;
                eprintln!("Transfer failed: {}", e);
            }
        }
    }

    let elapsed = start.elapsed();
    let rate = success_count as f64 / elapsed.as_secs_f64();

    let balance_a = store.get_account(a).await?.map(|acc| acc.balance);
    let balance_b = store.get_account(b).await?.map(|acc| acc.balance);
    let entries_a = store.sum_entries(a).await?;
    let entries_b = store.sum_entries(b).await?;

    println!("\n=== Load Test Results ===");
    println!("Total transfers: {}", transfer_count);
    println!("Successful: {}", success_count);
    println!("Failed: {}", failures);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} transfers/sec", rate);
    println!("Account {} balance: {:?} (entries net {})", a, balance_a, entries_a);
    println!("Account {} balance: {:?} (entries net {})", b, balance_b, entries_b);

    let conserved = balance_a == Some(OPENING_BALANCE + entries_a)
        && balance_b == Some(OPENING_BALANCE + entries_b)
        && entries_a + entries_b == 0;

    if !conserved {
        anyhow::bail!("balances do not match the recorded entries");
    }
    println!("Conservation check passed");

    // An odd count leaves one unmatched a -> b transfer
    let expected_net_a = -((transfer_count % 2) as i64) * AMOUNT;
    if failures == 0 && entries_a != expected_net_a {
        anyhow::bail!(
            "net change on account {} is {}, expected {}",
            a,
            entries_a,
            expected_net_a
        );
    }
    println!("Net balance check passed");

    Ok(())
}
