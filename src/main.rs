use anyhow::Context;
use cinerec::shared::{utils::logger::init_logger, Config, Database};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let config = Config::from_env().context("Failed to load configuration")?;
    let database =
        Database::new(&config.database_url).context("Failed to initialize database")?;

    {
        let mut conn = database
            .get_connection()
            .context("Failed to get database connection for migrations")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;
        log::info!("Database migrations completed successfully");
    }

    let services = cinerec::build_services(&config, &database);

    let worker = services.worker.clone();
    let worker_handle = worker.clone().start();
    log::info!("Recommendation worker initialized");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    log::info!("Shutdown signal received");

    worker.stop().await;
    worker_handle.await.ok();

    Ok(())
}
