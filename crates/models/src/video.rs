use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("Name of video is required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name must be at most {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Views and likes are counters and never negative.
pub fn validate_counter(field: &str, value: i64) -> Result<(), errors::ModelError> {
    if value < 0 {
        return Err(errors::ModelError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Build an insertable row at a caller-chosen id.
pub fn new_active(id: i32, name: &str, views: i64, likes: i64) -> Result<ActiveModel, errors::ModelError> {
    validate_name(name)?;
    validate_counter("views", views)?;
    validate_counter("likes", likes)?;
    Ok(ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        views: Set(views),
        likes: Set(likes),
    })
}
