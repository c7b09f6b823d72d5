//! One migrator per record service.
//!
//! Each migrator keeps its own bookkeeping table so the three services can
//! share a database without tripping over each other's applied versions.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_video;
mod m20220101_000002_create_task;
mod m20220101_000003_create_cafe;
mod m20220101_000004_add_cafe_indexes;

pub struct VideoMigrator;

#[async_trait::async_trait]
impl MigratorTrait for VideoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20220101_000001_create_video::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_videos").into_iden()
    }
}

pub struct TaskMigrator;

#[async_trait::async_trait]
impl MigratorTrait for TaskMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20220101_000002_create_task::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_tasks").into_iden()
    }
}

pub struct CafeMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CafeMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000003_create_cafe::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000004_add_cafe_indexes::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_cafes").into_iden()
    }
}
