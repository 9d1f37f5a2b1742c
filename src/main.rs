use dotenvy::dotenv;
use gasto_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Deployment settings (offset, default locale, currency)
    let settings = settings::load_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Database connection and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve messages from stdin until EOF
    let data = BotData::new(db, settings)?;
    bot::console::run_console(&data).await
}
