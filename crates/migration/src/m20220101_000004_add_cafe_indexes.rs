use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Cafe: index on location for exact-match search
        manager
            .create_index(
                Index::create()
                    .name("idx_cafe_location")
                    .table(Cafe::Table)
                    .col(Cafe::Location)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cafe_location").table(Cafe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cafe { Table, Location }
