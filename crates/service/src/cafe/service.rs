use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};

use models::cafe::{self, NewCafe};
use crate::{cafe::{samples, ApiKey}, errors::ServiceError, record::RecordStore};

/// Cafe directory operations. Destructive calls are gated by the injected `ApiKey`.
#[derive(Clone)]
pub struct CafeService {
    store: RecordStore<cafe::Entity>,
    api_key: ApiKey,
}

impl CafeService {
    pub fn new(db: DatabaseConnection, api_key: ApiKey) -> Self {
        Self { store: RecordStore::new(db, "Cafe"), api_key }
    }

    pub async fn list(&self) -> Result<Vec<cafe::Model>, ServiceError> {
        self.store.list().await
    }

    /// Uniformly random cafe; `NotFound` when the directory is empty.
    pub async fn random(&self) -> Result<cafe::Model, ServiceError> {
        let total = self.store.count().await?;
        if total == 0 {
            return Err(ServiceError::not_found(self.store.label()));
        }
        let index = rand::thread_rng().gen_range(0..total);
        self.store
            .nth(index)
            .await?
            .ok_or_else(|| ServiceError::not_found(self.store.label()))
    }

    /// Exact, case-sensitive location match.
    pub async fn search(&self, location: &str) -> Result<Vec<cafe::Model>, ServiceError> {
        self.store
            .list_filtered(Condition::all().add(cafe::Column::Location.eq(location)))
            .await
    }

    /// Insert inside an explicit transaction; any failure rolls it back.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn add(&self, new: NewCafe) -> Result<cafe::Model, ServiceError> {
        let name = new.name.clone();
        let am = new.into_active()?;

        let txn = self.begin().await?;
        match insert_unique(&txn, am, &name).await {
            Ok(created) => {
                txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
                info!(cafe_id = created.id, "cafe_created");
                Ok(created)
            }
            Err(e) => {
                rollback(txn).await;
                warn!(error = %e, "cafe_create_rolled_back");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn update_price(&self, id: i32, price: f64) -> Result<cafe::Model, ServiceError> {
        cafe::validate_price(price)?;
        let existing = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Cafe not found.".into()))?;
        let mut am: cafe::ActiveModel = existing.into();
        am.coffee_price = Set(Some(price));
        let updated = self.store.update(am).await?;
        info!(cafe_id = id, "cafe_price_updated");
        Ok(updated)
    }

    /// The key is checked before the store is touched.
    pub async fn delete(&self, id: i32, presented_key: Option<&str>) -> Result<(), ServiceError> {
        if !self.api_key.verify(presented_key) {
            warn!(cafe_id = id, "cafe_delete_forbidden");
            return Err(ServiceError::Forbidden("Forbidden: Invalid API key.".into()));
        }
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found(self.store.label()));
        }
        info!(cafe_id = id, "cafe_deleted");
        Ok(())
    }

    /// Seed the fixed sample cafes, skipping names already present.
    /// Returns how many rows were inserted.
    pub async fn insert_sample_data(&self) -> Result<usize, ServiceError> {
        let txn = self.begin().await?;
        let mut inserted = 0;
        for sample in samples::sample_cafes() {
            let name = sample.name.clone();
            let result = match find_by_name(&txn, &name).await {
                Ok(Some(_)) => continue,
                Ok(None) => match sample.into_active() {
                    Ok(am) => am.insert(&txn).await.map_err(|e| ServiceError::from_db("Cafe", e)),
                    Err(e) => Err(e.into()),
                },
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                rollback(txn).await;
                warn!(error = %e, "cafe_seed_rolled_back");
                return Err(e);
            }
            inserted += 1;
        }
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(inserted, "cafe_samples_inserted");
        Ok(inserted)
    }

    async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        self.store
            .connection()
            .begin()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}

async fn find_by_name(txn: &DatabaseTransaction, name: &str) -> Result<Option<cafe::Model>, ServiceError> {
    cafe::Entity::find()
        .filter(cafe::Column::Name.eq(name))
        .one(txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

async fn insert_unique(txn: &DatabaseTransaction, am: cafe::ActiveModel, name: &str) -> Result<cafe::Model, ServiceError> {
    if find_by_name(txn, name).await?.is_some() {
        return Err(ServiceError::Conflict(format!("A cafe named '{name}' already exists.")));
    }
    am.insert(txn).await.map_err(|e| ServiceError::from_db("Cafe", e))
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!(error = %e, "transaction rollback failed");
    }
}
