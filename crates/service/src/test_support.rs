#![cfg(test)]
use migration::{CafeMigrator, MigratorTrait, TaskMigrator, VideoMigrator};
use sea_orm::DatabaseConnection;

/// Fresh in-memory database per test, with every service's tables created.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect("sqlite::memory:").await?;
    VideoMigrator::up(&db, None).await?;
    TaskMigrator::up(&db, None).await?;
    CafeMigrator::up(&db, None).await?;
    Ok(db)
}
