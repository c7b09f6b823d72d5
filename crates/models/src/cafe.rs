use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A validated cafe awaiting insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: i32,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: f64,
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max_len {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::ModelError::Validation("Invalid price format.".into()));
    }
    Ok(())
}

impl NewCafe {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_text("name", &self.name, 250)?;
        validate_text("map_url", &self.map_url, 500)?;
        validate_text("img_url", &self.img_url, 500)?;
        validate_text("location", &self.location, 250)?;
        if self.seats < 0 {
            return Err(errors::ModelError::Validation("seats must be >= 0".into()));
        }
        validate_price(self.coffee_price)
    }

    pub fn into_active(self) -> Result<ActiveModel, errors::ModelError> {
        self.validate()?;
        Ok(ActiveModel {
            id: NotSet,
            name: Set(self.name),
            map_url: Set(self.map_url),
            img_url: Set(self.img_url),
            location: Set(self.location),
            seats: Set(self.seats.to_string()),
            has_toilet: Set(self.has_toilet),
            has_wifi: Set(self.has_wifi),
            has_sockets: Set(self.has_sockets),
            can_take_calls: Set(self.can_take_calls),
            coffee_price: Set(Some(self.coffee_price)),
        })
    }
}
