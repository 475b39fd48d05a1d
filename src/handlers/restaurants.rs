use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::fields::filter_updatable_fields;
use crate::db::listing::SortColumn;
use crate::db::restaurants::{self, NewRestaurant};
use crate::entities::restaurant;
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListRestaurantsParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<restaurant::WithRating>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub restaurant: restaurant::Model,
}

/// List rated restaurants, optionally filtered by name and sorted
pub async fn list_restaurants(
    State(state): State<AppState>,
    params: Result<Query<ListRestaurantsParams>, QueryRejection>,
) -> AppResult<Json<RestaurantsResponse>> {
    let Query(params) = params?;
    let sort = match params.sort_by.as_deref() {
        Some(sort_by) => sort_by.parse::<SortColumn>()?,
        None => SortColumn::default(),
    };
    let search = params.search.unwrap_or_default();

    let restaurants = restaurants::list_restaurants(&state.db, &search, sort).await?;

    Ok(Json(RestaurantsResponse { restaurants }))
}

/// Create a restaurant
pub async fn create_restaurant(
    State(state): State<AppState>,
    payload: Result<Json<NewRestaurant>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RestaurantResponse>)> {
    let Json(payload) = payload?;
    let restaurant = restaurants::create_restaurant(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(RestaurantResponse { restaurant })))
}

/// Delete a restaurant. Answers 204 whether or not the id existed.
pub async fn delete_restaurant(
    State(state): State<AppState>,
    restaurant_id: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(restaurant_id) = restaurant_id?;
    restaurants::delete_restaurant(&state.db, restaurant_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a restaurant. Unknown keys in the body are ignored and a
/// request without a body counts as an empty object.
pub async fn update_restaurant(
    State(state): State<AppState>,
    restaurant_id: Result<Path<i32>, PathRejection>,
    payload: Result<Option<Json<Map<String, Value>>>, JsonRejection>,
) -> AppResult<Json<RestaurantResponse>> {
    let Path(restaurant_id) = restaurant_id?;
    let payload = payload?.map(|Json(fields)| fields).unwrap_or_default();
    let fields = filter_updatable_fields(payload)?;

    let restaurant = restaurants::update_restaurant(&state.db, restaurant_id, fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?;

    Ok(Json(RestaurantResponse { restaurant }))
}
