use money_manager_client::types::{TransactionRequest, TransactionType};
use money_manager_client::{ApiClient, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // MONEY_MANAGER_API_URL=http://localhost:8080/api
    let cfg = Config::from_env()?;
    let client = ApiClient::builder(cfg)
        .on_session_expired(|route: &str| eprintln!("session expired, go to {route}"))
        .build()?;

    client.user().login("ana@example.com", "secret").await?;
    let profile = client.user().profile().await?;
    println!("signed in as {:?}", profile.name);

    for account in client.accounts().list().await? {
        println!("{:>8.2}  {}", account.balance, account.name);
    }

    let tx = client
        .transactions()
        .create(&TransactionRequest {
            description: "Coffee".into(),
            amount: 3.2,
            kind: TransactionType::Expense,
            account_id: 1,
            category_id: 1,
            date: None,
        })
        .await?;
    println!("created transaction {}", tx.id);

    for budget in client.budgets().list().await? {
        println!("{:?}: {:.0}%", budget.category_name, budget.percentage);
    }
    Ok(())
}
