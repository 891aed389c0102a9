use escmd_application::{
    AppError, AppResult, CommandDispatcher, CommandTable, DispatcherOptions, FrozenMessage,
    Message,
};
use escmd_domain::entity::Entity;
use escmd_domain::persist::{CachedEntityStore, InMemoryEntityStore};
use escmd_macros::{command_handler, entity, entity_id};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[entity_id]
struct AccountNo(u64);

#[entity(id = AccountNo)]
struct Account {
    owner: String,
    balance: i64,
    closed: bool,
}

#[derive(Debug, Deserialize)]
struct Amount {
    amount: i64,
}

type AccountStore = Arc<CachedEntityStore<InMemoryEntityStore<Account>, Account>>;

struct Accounts {
    store: AccountStore,
    options: DispatcherOptions,
    commands: CommandTable<Self>,
}

impl Accounts {
    fn new(store: AccountStore, options: DispatcherOptions) -> AppResult<Self> {
        Ok(Self {
            store,
            options,
            commands: Self::command_table()?,
        })
    }

    fn overdraft_limit(&self) -> i64 {
        self.options
            .extension("overdraft_limit")
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }
}

#[command_handler]
impl Accounts {
    async fn deposit(&self, message: FrozenMessage, mut account: Account) -> AppResult<Value> {
        let Amount { amount } = message.parse()?;
        if account.closed || amount <= 0 {
            return Err(AppError::Validation(format!("cannot deposit {amount}")));
        }
        account.balance += amount;
        account.version += 1;
        self.commit(&account).await
    }

    async fn withdraw(&self, message: FrozenMessage, mut account: Account) -> AppResult<Value> {
        let Amount { amount } = message.parse()?;
        if account.balance - amount < -self.overdraft_limit() {
            return Err(AppError::Validation("insufficient funds".into()));
        }
        account.balance -= amount;
        account.version += 1;
        self.commit_with_result(&account, &json!({ "balance": account.balance }))
            .await
    }

    #[command(name = "close-account")]
    async fn close(&self, _message: FrozenMessage, mut account: Account) -> AppResult<Value> {
        account.closed = true;
        account.version += 1;
        self.commit(&account).await
    }
}

impl CommandDispatcher for Accounts {
    type Entity = Account;
    type Store = AccountStore;

    fn store(&self) -> &Self::Store {
        &self.store
    }

    fn options(&self) -> &DispatcherOptions {
        &self.options
    }

    fn commands(&self) -> &CommandTable<Self> {
        &self.commands
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let backing = InMemoryEntityStore::new();
    let mut account = Account::new(AccountNo::new(1001), 1);
    account.owner = "alice".into();
    backing.insert(account);

    let options = DispatcherOptions::from_json(
        r#"{ "name": "accounts", "extensions": { "overdraft_limit": 50 } }"#,
    )?;
    let accounts = Accounts::new(Arc::new(CachedEntityStore::new(backing)), options)?;
    println!("commands: {:?}", accounts.commands().names());

    let out = accounts
        .handle("deposit", Message::new().field("id", 1001).field("amount", 500))
        .await?;
    println!("✅ deposit -> {out}");

    let out = accounts
        .handle("withdraw", Message::new().field("id", 1001).field("amount", 520))
        .await?;
    println!("✅ withdraw -> {out}");

    // 保留名、未知命令与非法标识都在加载实体之前或加载时失败
    for (name, message) in [
        ("commit", Message::new().field("id", 1001)),
        ("transfer", Message::new().field("id", 1001)),
        ("deposit", Message::with_id("not-a-number")),
        ("deposit", Message::new().field("id", 9999).field("amount", 1)),
    ] {
        accounts
            .handle_with_callback(name, message, |res| match res {
                Ok(v) => println!("unexpected success: {v}"),
                Err(e) => println!("❌ {name}: {e}"),
            })
            .await;
    }

    let out = accounts
        .handle("close-account", Message::new().field("id", 1001))
        .await?;
    println!("✅ closed -> {out}");

    Ok(())
}
