use dotenvy::dotenv;
use mill_recap::config;
use mill_recap::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Process startup: logging, environment, settings, database schema.
///
/// The three user operations - add order, add recap, generate report - are
/// plain function calls in `mill_recap::core`, invoked by whatever
/// presentation layer fronts this process. Startup only prepares the ground:
/// it rebuilds the order tables and ensures the recap table exists.
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

    // 3. Load settings (report output directory)
    let settings = config::settings::load_default_settings()?;
    info!(report_dir = %settings.report_dir.display(), "Settings loaded");

    // 4. Connect and initialize the schema
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized; ready for order and recap entry");

    Ok(())
}
