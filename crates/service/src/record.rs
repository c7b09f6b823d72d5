//! Generic record store shared by every entity.
//!
//! Each service instantiates `RecordStore<E>` for its own table instead of
//! hand-writing the same find/insert/update/delete calls per entity.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::errors::ServiceError;

pub struct RecordStore<E> {
    db: DatabaseConnection,
    label: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordStore<E> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), label: self.label, _entity: PhantomData }
    }
}

impl<E> RecordStore<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    /// `label` names the entity in not-found and conflict messages.
    pub fn new(db: DatabaseConnection, label: &'static str) -> Self {
        Self { db, label, _entity: PhantomData }
    }

    pub fn label(&self) -> &'static str { self.label }

    /// Underlying connection, for callers that need an explicit transaction.
    pub fn connection(&self) -> &DatabaseConnection { &self.db }

    fn ordered(select: Select<E>) -> Select<E> {
        let mut select = select;
        for key in E::PrimaryKey::iter() {
            select = select.order_by_asc(key.into_column());
        }
        select
    }

    /// All rows ordered by primary key.
    pub async fn list(&self) -> Result<Vec<E::Model>, ServiceError> {
        Self::ordered(E::find())
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Rows matching `condition`, ordered by primary key.
    pub async fn list_filtered(&self, condition: Condition) -> Result<Vec<E::Model>, ServiceError> {
        Self::ordered(E::find().filter(condition))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        E::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// The row at `index` in primary-key order, if any.
    pub async fn nth(&self, index: u64) -> Result<Option<E::Model>, ServiceError> {
        Self::ordered(E::find())
            .offset(index)
            .limit(1u64)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    pub async fn find(&self, id: i32) -> Result<Option<E::Model>, ServiceError> {
        E::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Like `find`, but a missing row is `ServiceError::NotFound`.
    pub async fn require(&self, id: i32) -> Result<E::Model, ServiceError> {
        self.find(id).await?.ok_or_else(|| ServiceError::not_found(self.label))
    }

    pub async fn insert(&self, am: E::ActiveModel) -> Result<E::Model, ServiceError> {
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(self.label, e))
    }

    pub async fn update(&self, am: E::ActiveModel) -> Result<E::Model, ServiceError> {
        am.update(&self.db).await.map_err(|e| ServiceError::from_db(self.label, e))
    }

    /// Returns true if a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::task;
    use sea_orm::ColumnTrait;

    #[tokio::test]
    async fn list_is_ordered_and_filterable() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let store: RecordStore<task::Entity> = RecordStore::new(db, "task");

        for name in ["b", "a", "c"] {
            store.insert(task::new_active(name)?).await?;
        }
        let names: Vec<String> = store.list().await?.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        let only_a = store.list_filtered(Condition::all().add(task::Column::Name.eq("a"))).await?;
        assert_eq!(only_a.len(), 1);
        assert_eq!(store.count().await?, 3);
        assert_eq!(store.nth(2).await?.map(|t| t.name), Some("c".to_string()));
        assert!(store.nth(3).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn require_and_delete_report_missing_rows() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let store: RecordStore<task::Entity> = RecordStore::new(db, "task");

        let err = store.require(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "task not found"));
        assert!(!store.delete(42).await?);

        let t = store.insert(task::new_active("x")?).await?;
        assert!(store.delete(t.id).await?);
        assert!(store.find(t.id).await?.is_none());
        Ok(())
    }
}
