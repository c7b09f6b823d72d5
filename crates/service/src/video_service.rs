use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};

use models::video;
use crate::{errors::ServiceError, record::RecordStore};

/// Fields required to create a video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

/// Partial update; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub name: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.views.is_none() && self.likes.is_none()
    }

    fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.name { video::validate_name(n)?; }
        if let Some(v) = self.views { video::validate_counter("views", v)?; }
        if let Some(l) = self.likes { video::validate_counter("likes", l)?; }
        Ok(())
    }
}

#[derive(Clone)]
pub struct VideoService {
    store: RecordStore<video::Entity>,
}

impl VideoService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { store: RecordStore::new(db, "Video") }
    }

    pub async fn get(&self, id: i32) -> Result<video::Model, ServiceError> {
        self.store.require(id).await
    }

    /// Create a video at a caller-chosen id; an existing id is a conflict and
    /// the stored row is left untouched.
    #[instrument(skip(self, input), fields(video_id = id))]
    pub async fn create(&self, id: i32, input: NewVideo) -> Result<video::Model, ServiceError> {
        let am = video::new_active(id, &input.name, input.views, input.likes)?;
        if self.store.find(id).await?.is_some() {
            return Err(ServiceError::Conflict("Video id taken".into()));
        }
        let created = self.store.insert(am).await?;
        info!(video_id = created.id, name = %created.name, "video_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(video_id = id))]
    pub async fn patch(&self, id: i32, patch: VideoPatch) -> Result<video::Model, ServiceError> {
        patch.validate()?;
        let existing = self.store.require(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let mut am: video::ActiveModel = existing.into();
        if let Some(n) = patch.name { am.name = Set(n); }
        if let Some(v) = patch.views { am.views = Set(v); }
        if let Some(l) = patch.likes { am.likes = Set(l); }
        let updated = self.store.update(am).await?;
        info!(video_id = updated.id, "video_updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found(self.store.label()));
        }
        info!(video_id = id, "video_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn intro() -> NewVideo {
        NewVideo { name: "intro".into(), views: 100, likes: 5 }
    }

    #[tokio::test]
    async fn video_crud_service() -> Result<(), anyhow::Error> {
        let svc = VideoService::new(get_db().await?);

        let created = svc.create(1, intro()).await?;
        assert_eq!(created, video::Model { id: 1, name: "intro".into(), views: 100, likes: 5 });
        assert_eq!(svc.get(1).await?, created);

        let patched = svc.patch(1, VideoPatch { likes: Some(10), ..Default::default() }).await?;
        assert_eq!(patched, video::Model { id: 1, name: "intro".into(), views: 100, likes: 10 });

        svc.delete(1).await?;
        assert!(matches!(svc.get(1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_on_taken_id_conflicts_and_keeps_original() -> Result<(), anyhow::Error> {
        let svc = VideoService::new(get_db().await?);
        svc.create(3, intro()).await?;

        let again = svc.create(3, NewVideo { name: "other".into(), views: 1, likes: 1 }).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get(3).await?.name, "intro");
        Ok(())
    }

    #[tokio::test]
    async fn patch_applies_zero_and_leaves_other_fields() -> Result<(), anyhow::Error> {
        let svc = VideoService::new(get_db().await?);
        svc.create(5, intro()).await?;

        let p = svc.patch(5, VideoPatch { views: Some(0), ..Default::default() }).await?;
        assert_eq!((p.name.as_str(), p.views, p.likes), ("intro", 0, 5));

        let unchanged = svc.patch(5, VideoPatch::default()).await?;
        assert_eq!(unchanged, p);

        let bad = svc.patch(5, VideoPatch { likes: Some(-1), ..Default::default() }).await;
        assert!(matches!(bad, Err(ServiceError::Model(_))));
        assert!(matches!(svc.patch(99, VideoPatch::default()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
