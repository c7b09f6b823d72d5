//! Parsing of form-encoded cafe submissions and price query parameters.
//!
//! Amenity flags accept explicit tokens or checkbox presence: an absent key is
//! `false`; `true/on/1/yes` are `true`; `false/off/0/no` and the empty string
//! are `false`. Anything else is rejected instead of being coerced.

use std::collections::HashMap;

use models::cafe::{self, NewCafe};

use crate::errors::ServiceError;

pub type FormFields = HashMap<String, String>;

fn required_text(form: &FormFields, key: &str) -> Result<String, ServiceError> {
    match form.get(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ServiceError::Validation(format!("Missing required form field: {key}."))),
    }
}

fn required_raw<'a>(form: &'a FormFields, key: &str) -> Result<&'a str, ServiceError> {
    form.get(key)
        .map(String::as_str)
        .ok_or_else(|| ServiceError::Validation(format!("Missing required form field: {key}.")))
}

pub fn parse_flag(form: &FormFields, key: &str) -> Result<bool, ServiceError> {
    let Some(raw) = form.get(key) else { return Ok(false) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        _ => Err(ServiceError::Validation(format!(
            "invalid value for {key}: '{raw}' (expected true or false)"
        ))),
    }
}

pub fn parse_seats(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| ServiceError::Validation(format!("invalid value for seats: '{raw}' ({e})")))
}

pub fn parse_coffee_price(raw: &str) -> Result<f64, ServiceError> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ServiceError::Validation(format!("invalid value for coffee_price: '{raw}' ({e})")))?;
    cafe::validate_price(price)
        .map_err(|_| ServiceError::Validation(format!("invalid value for coffee_price: '{raw}' (must be a non-negative number)")))?;
    Ok(price)
}

/// Build a `NewCafe` from submitted form fields.
pub fn parse_new_cafe(form: &FormFields) -> Result<NewCafe, ServiceError> {
    let name = required_text(form, "name")?;
    let map_url = required_text(form, "map_url")?;
    let img_url = required_text(form, "img_url")?;
    let location = required_text(form, "location")?;
    let seats = required_raw(form, "seats")?;
    let coffee_price = required_raw(form, "coffee_price")?;

    let seats = parse_seats(seats)?;
    let coffee_price = parse_coffee_price(coffee_price)?;

    Ok(NewCafe {
        name,
        map_url,
        img_url,
        location,
        seats,
        has_toilet: parse_flag(form, "has_toilet")?,
        has_wifi: parse_flag(form, "has_wifi")?,
        has_sockets: parse_flag(form, "has_sockets")?,
        can_take_calls: parse_flag(form, "can_take_calls")?,
        coffee_price,
    })
}

/// Parse the `new_price` query parameter of a price update.
pub fn parse_new_price(raw: Option<&str>) -> Result<f64, ServiceError> {
    let raw = raw.ok_or_else(|| ServiceError::Validation("Missing required parameter: new_price.".into()))?;
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ServiceError::Validation("Invalid price format.".into()))?;
    cafe::validate_price(price).map_err(|_| ServiceError::Validation("Invalid price format.".into()))?;
    Ok(price)
}
