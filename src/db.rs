use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

use crate::{activities, config::AppConfig};

/// Apply the embedded migrations. A failure aborts startup.
pub async fn run_migrations(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

pub async fn seed(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    if !config.seed_catalog {
        return Ok(());
    }
    let inserted = activities::repo::seed_catalog(db).await?;
    if inserted > 0 {
        info!(inserted, "activity catalog seeded");
    }
    Ok(())
}
