use sea_orm::{DatabaseConnection, Set};
use tracing::info;

use models::task;
use crate::{errors::ServiceError, record::RecordStore};

#[derive(Clone)]
pub struct TaskService {
    store: RecordStore<task::Entity>,
}

impl TaskService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { store: RecordStore::new(db, "Task") }
    }

    /// All tasks ordered by id.
    pub async fn list(&self) -> Result<Vec<task::Model>, ServiceError> {
        self.store.list().await
    }

    pub async fn create(&self, name: &str) -> Result<task::Model, ServiceError> {
        let created = self.store.insert(task::new_active(name)?).await?;
        info!(task_id = created.id, "task_created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<task::Model, ServiceError> {
        self.store.require(id).await
    }

    /// Replace the task's name.
    pub async fn rename(&self, id: i32, name: &str) -> Result<task::Model, ServiceError> {
        task::validate_name(name)?;
        let mut am: task::ActiveModel = self.store.require(id).await?.into();
        am.name = Set(name.to_string());
        let updated = self.store.update(am).await?;
        info!(task_id = id, "task_renamed");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found(self.store.label()));
        }
        info!(task_id = id, "task_deleted");
        Ok(())
    }
}
