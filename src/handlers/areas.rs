use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::db::areas;
use crate::entities::restaurant;
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AreaRestaurants {
    pub area_id: i32,
    pub area_name: String,
    pub restaurants: Vec<restaurant::Model>,
    pub total_restaurants: usize,
}

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub area: AreaRestaurants,
}

/// Get an area together with all of its restaurants
pub async fn list_area_restaurants(
    State(state): State<AppState>,
    area_id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<AreaResponse>> {
    let Path(area_id) = area_id?;
    let area = areas::get_area(&state.db, area_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Area not found".to_string()))?;

    let restaurants = areas::list_restaurants_by_area(&state.db, area_id).await?;

    Ok(Json(AreaResponse {
        area: AreaRestaurants {
            area_id: area.area_id,
            area_name: area.area_name,
            total_restaurants: restaurants.len(),
            restaurants,
        },
    }))
}
