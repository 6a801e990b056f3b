use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, error, info, trace};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let db = match Database::connect(database_url).await {
        Ok(db) => {
            debug!("Connected to database");
            db
        }
        Err(e) => {
            error!("Failed to connect to database {}: {}", database_url, e);
            return Err(e.into());
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    info!("Database initialized successfully");
    Ok(())
}
