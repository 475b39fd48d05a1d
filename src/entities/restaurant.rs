use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub area_id: i32,
    pub cuisine: String,
    pub website: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::area::Entity",
        from = "Column::AreaId",
        to = "super::area::Column::AreaId"
    )]
    Area,
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::area::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Area.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A restaurant row joined with the mean of its ratings.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct WithRating {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub area_id: i32,
    pub cuisine: String,
    pub website: String,
    pub average_rating: f64,
}
