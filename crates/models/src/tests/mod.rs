use sea_orm::DatabaseConnection;
use migration::{CafeMigrator, MigratorTrait, TaskMigrator, VideoMigrator};



/// Fresh in-memory database with every service's tables.
pub async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = crate::db::connect("sqlite::memory:").await?;
    VideoMigrator::up(&db, None).await?;
    TaskMigrator::up(&db, None).await?;
    CafeMigrator::up(&db, None).await?;
    Ok(db)
}
