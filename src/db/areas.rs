use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{area, restaurant};
use crate::error::AppResult;

pub async fn get_area(db: &DatabaseConnection, area_id: i32) -> AppResult<Option<area::Model>> {
    Ok(area::Entity::find_by_id(area_id).one(db).await?)
}

/// Every restaurant in the area, rated or not, in the store's own order.
pub async fn list_restaurants_by_area(
    db: &DatabaseConnection,
    area_id: i32,
) -> AppResult<Vec<restaurant::Model>> {
    Ok(restaurant::Entity::find()
        .filter(restaurant::Column::AreaId.eq(area_id))
        .all(db)
        .await?)
}
