use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name must be at most {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Build an insertable row; the id is assigned by the store.
pub fn new_active(name: &str) -> Result<ActiveModel, errors::ModelError> {
    validate_name(name)?;
    Ok(ActiveModel { id: NotSet, name: Set(name.to_string()) })
}
