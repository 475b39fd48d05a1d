use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::handlers::{areas, health, restaurants};
use crate::middleware::logging::log_request;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(health::health_check))
        // Restaurants
        .route(
            "/api/restaurants",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        .route(
            "/api/restaurants/{restaurant_id}",
            patch(restaurants::update_restaurant).delete(restaurants::delete_restaurant),
        )
        // Areas
        .route(
            "/api/areas/{area_id}/restaurants",
            get(areas::list_area_restaurants),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
