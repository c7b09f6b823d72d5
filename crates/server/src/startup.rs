use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, ServiceKind};
use migration::{CafeMigrator, MigratorTrait, TaskMigrator, VideoMigrator};
use sea_orm::DatabaseConnection;
use tracing::info;
use utoipa::OpenApi;

use service::{
    cafe::{ApiKey, CafeService},
    people::StaticPersonDirectory,
    task_service::TaskService,
    video_service::VideoService,
};

use crate::errors::StartupError;
use crate::openapi::{CafeApiDoc, TaskApiDoc, VideoApiDoc};
use crate::routes::{self, cafes, tasks, videos};

/// Apply the migrator owning `kind`'s table.
pub async fn migrate(kind: ServiceKind, db: &DatabaseConnection) -> Result<(), StartupError> {
    let res = match kind {
        ServiceKind::Videos => VideoMigrator::up(db, None).await,
        ServiceKind::Tasks => TaskMigrator::up(db, None).await,
        ServiceKind::Cafes => CafeMigrator::up(db, None).await,
    };
    res.map_err(|e| StartupError::Migration(e.to_string()))
}

/// Build the complete router for one service on an already-migrated database.
pub fn app(kind: ServiceKind, db: DatabaseConnection, cfg: &AppConfig) -> Result<Router, StartupError> {
    let router = match kind {
        ServiceKind::Videos => {
            let state = videos::VideoState {
                videos: VideoService::new(db),
                people: Arc::new(StaticPersonDirectory),
            };
            routes::with_ambient(kind.name(), videos::router(state), VideoApiDoc::openapi())
        }
        ServiceKind::Tasks => {
            routes::with_ambient(kind.name(), tasks::router(TaskService::new(db)), TaskApiDoc::openapi())
        }
        ServiceKind::Cafes => {
            let key = ApiKey::new(cfg.cafes.api_key.clone())
                .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            routes::with_ambient(kind.name(), cafes::router(CafeService::new(db, key)), CafeApiDoc::openapi())
        }
    };
    Ok(router)
}

/// Connect, migrate and serve `kind` until Ctrl+C.
pub async fn run(kind: ServiceKind, cfg: AppConfig) -> anyhow::Result<()> {
    let url = cfg.service(kind).database_url.clone();
    let db = models::db::connect_with_config(&url, &cfg.database).await?;
    migrate(kind, &db).await?;

    let app = app(kind, db, &cfg)?;

    let addr = cfg.bind_addr(kind);
    info!(service = kind.name(), %addr, "listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(kind))
        .await?;
    Ok(())
}

async fn shutdown_signal(kind: ServiceKind) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = kind.name(), event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}
