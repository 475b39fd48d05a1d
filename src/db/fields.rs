use sea_orm::ActiveValue::Set;
use serde_json::{Map, Value};

use crate::entities::restaurant;
use crate::error::{AppError, AppResult};

/// Restaurant columns a client may change. `restaurant_id` is never among them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatableField {
    AreaId,
    RestaurantName,
    Cuisine,
    Website,
}

impl UpdatableField {
    pub const ALL: [UpdatableField; 4] = [
        UpdatableField::AreaId,
        UpdatableField::RestaurantName,
        UpdatableField::Cuisine,
        UpdatableField::Website,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpdatableField::AreaId => "area_id",
            UpdatableField::RestaurantName => "restaurant_name",
            UpdatableField::Cuisine => "cuisine",
            UpdatableField::Website => "website",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        UpdatableField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
    }
}

/// A non-empty set of allow-listed columns and their requested values.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatableFields(Vec<(UpdatableField, Value)>);

impl UpdatableFields {
    #[cfg(test)]
    fn fields(&self) -> impl Iterator<Item = UpdatableField> + '_ {
        self.0.iter().map(|(field, _)| *field)
    }

    /// Convert to an active model where only the requested columns are set.
    /// Values of the wrong JSON type are rejected here, before any statement runs.
    pub fn into_active_model(self) -> AppResult<restaurant::ActiveModel> {
        let mut active = restaurant::ActiveModel::default();

        for (field, value) in self.0 {
            match field {
                UpdatableField::AreaId => {
                    let area_id = value
                        .as_i64()
                        .and_then(|id| i32::try_from(id).ok())
                        .ok_or_else(|| AppError::InvalidField(field.as_str().to_string()))?;
                    active.area_id = Set(area_id);
                }
                UpdatableField::RestaurantName => {
                    active.restaurant_name = Set(expect_string(field, value)?);
                }
                UpdatableField::Cuisine => {
                    active.cuisine = Set(expect_string(field, value)?);
                }
                UpdatableField::Website => {
                    active.website = Set(expect_string(field, value)?);
                }
            }
        }

        Ok(active)
    }
}

fn expect_string(field: UpdatableField, value: Value) -> AppResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(AppError::InvalidField(field.as_str().to_string())),
    }
}

/// Keep only the allow-listed keys of `input`; everything else is dropped
/// silently. Fails with [`AppError::NoUpdatableFields`] when nothing is left.
pub fn filter_updatable_fields(input: Map<String, Value>) -> AppResult<UpdatableFields> {
    let fields: Vec<_> = input
        .into_iter()
        .filter_map(|(key, value)| UpdatableField::from_key(&key).map(|field| (field, value)))
        .collect();

    if fields.is_empty() {
        return Err(AppError::NoUpdatableFields);
    }

    Ok(UpdatableFields(fields))
}
