use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Connect with default pool settings.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    connect_with_config(url, &DatabaseConfig::default()).await
}

/// Connect using pool settings from configuration.
///
/// An in-memory SQLite database lives inside a single connection, so the pool
/// is pinned to one connection for `:memory:` URLs.
pub async fn connect_with_config(url: &str, cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(url.to_owned());
    let (max, min) = if is_in_memory(url) {
        (1, 1)
    } else {
        (cfg.max_connections, cfg.min_connections)
    };
    opt.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), max_connections = max, "database connected");
    Ok(db)
}

fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(!is_in_memory("sqlite://cafes.db?mode=rwc"));
        assert!(!is_in_memory("postgres://localhost/:memory:"));
    }
}
