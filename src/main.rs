use chrono::Local;
use dotenvy::dotenv;
use fintrack::{
    config::{database, settings},
    core::{TransactionStore, preferences, report::Dashboard, seed},
    errors::Result,
    storage::DatabaseStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load dashboard settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Open the database and the transaction store
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    let mut store = TransactionStore::open(DatabaseStore::new(db)).await?;

    // 5. Seed demo data on first run
    if settings.seed_demo_data {
        seed::seed_if_empty(&mut store, Local::now().date_naive()).await?;
    }

    let theme = preferences::load_theme(store.backend()).await?;
    info!("Using {} theme", theme);

    // 6. Render the dashboard
    let dashboard = Dashboard::build(store.transactions(), &settings.dashboard_options());
    println!("{}", dashboard.render(&settings.currency_symbol));

    store.close().await?;
    info!("Snapshot saved.");

    Ok(())
}
