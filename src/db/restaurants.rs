use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use serde::Deserialize;

use crate::db::fields::UpdatableFields;
use crate::db::listing::{build_listing_query, SortColumn};
use crate::entities::restaurant;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct NewRestaurant {
    pub restaurant_name: String,
    pub area_id: i32,
    pub cuisine: String,
    #[serde(default)]
    pub website: String,
}

pub async fn list_restaurants(
    db: &DatabaseConnection,
    search: &str,
    sort: SortColumn,
) -> AppResult<Vec<restaurant::WithRating>> {
    let restaurants = build_listing_query(search, sort)
        .into_model::<restaurant::WithRating>()
        .all(db)
        .await?;

    tracing::debug!(count = restaurants.len(), sort = %sort, "Listed restaurants");
    Ok(restaurants)
}

pub async fn create_restaurant(
    db: &DatabaseConnection,
    new_restaurant: NewRestaurant,
) -> AppResult<restaurant::Model> {
    let restaurant = restaurant::ActiveModel {
        restaurant_name: Set(new_restaurant.restaurant_name),
        area_id: Set(new_restaurant.area_id),
        cuisine: Set(new_restaurant.cuisine),
        website: Set(new_restaurant.website),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(restaurant_id = restaurant.restaurant_id, "Created restaurant");
    Ok(restaurant)
}

/// Delete a restaurant, returning the removed row if there was one.
pub async fn delete_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i32,
) -> AppResult<Option<restaurant::Model>> {
    let statement = Query::delete()
        .from_table(restaurant::Entity)
        .and_where(restaurant::Column::RestaurantId.eq(restaurant_id))
        .returning_all()
        .to_owned();

    let deleted = restaurant::Entity::find()
        .from_raw_sql(db.get_database_backend().build(&statement))
        .one(db)
        .await?;

    tracing::debug!(restaurant_id, deleted = deleted.is_some(), "Deleted restaurant");
    Ok(deleted)
}

/// Apply `fields` to one restaurant in a single UPDATE. `None` when the id is unknown.
pub async fn update_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i32,
    fields: UpdatableFields,
) -> AppResult<Option<restaurant::Model>> {
    let changes = fields.into_active_model()?;

    let mut updated = restaurant::Entity::update_many()
        .set(changes)
        .filter(restaurant::Column::RestaurantId.eq(restaurant_id))
        .exec_with_returning(db)
        .await?;

    tracing::debug!(restaurant_id, updated = !updated.is_empty(), "Updated restaurant");
    Ok(updated.pop())
}
