//! Construction of the rating-joined restaurant listing.
//!
//! The search term only ever reaches the database as a bound parameter, and
//! the sort column is chosen from [`SortColumn`], so no caller-supplied text is
//! spliced into the statement.

use std::fmt;
use std::str::FromStr;

use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

use crate::entities::{rating, restaurant};
use crate::error::AppError;

pub const AVERAGE_RATING: &str = "average_rating";

const LIKE_ESCAPE: char = '\\';

/// Columns the listing may be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    RestaurantName,
    AreaId,
    Cuisine,
    Website,
    AverageRating,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::RestaurantName,
        SortColumn::AreaId,
        SortColumn::Cuisine,
        SortColumn::Website,
        SortColumn::AverageRating,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::RestaurantName => "restaurant_name",
            SortColumn::AreaId => "area_id",
            SortColumn::Cuisine => "cuisine",
            SortColumn::Website => "website",
            SortColumn::AverageRating => AVERAGE_RATING,
        }
    }

    fn order_expr(self) -> SimpleExpr {
        let column = match self {
            SortColumn::RestaurantName => restaurant::Column::RestaurantName,
            SortColumn::AreaId => restaurant::Column::AreaId,
            SortColumn::Cuisine => restaurant::Column::Cuisine,
            SortColumn::Website => restaurant::Column::Website,
            // Aggregate alias from the select list.
            SortColumn::AverageRating => return Expr::col(Alias::new(AVERAGE_RATING)).into(),
        };
        Expr::col((restaurant::Entity, column)).into()
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| AppError::InvalidSort(s.to_string()))
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape LIKE metacharacters so `search` matches as a literal substring.
fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Restaurants that have at least one rating, with their mean rating,
/// filtered by a case-sensitive name substring and ordered descending by
/// `sort`. Ties fall back to ascending `restaurant_id`.
pub fn build_listing_query(search: &str, sort: SortColumn) -> Select<restaurant::Entity> {
    let average = Func::cast_as(
        Func::avg(Expr::col((rating::Entity, rating::Column::Rating))),
        Alias::new("double precision"),
    );
    let pattern = LikeExpr::new(format!("%{}%", escape_like(search))).escape(LIKE_ESCAPE);

    restaurant::Entity::find()
        .column_as(SimpleExpr::from(average), AVERAGE_RATING)
        .join(JoinType::InnerJoin, restaurant::Relation::Ratings.def())
        .filter(restaurant::Column::RestaurantName.like(pattern))
        .group_by(restaurant::Column::RestaurantId)
        .order_by(sort.order_expr(), Order::Desc)
        .order_by_asc(restaurant::Column::RestaurantId)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait, Value};

    use super::*;

    fn render(search: &str, sort: SortColumn) -> (String, Vec<Value>) {
        let statement = build_listing_query(search, sort).build(DbBackend::Postgres);
        let values = statement.values.map(|v| v.0).unwrap_or_default();
        (statement.sql, values)
    }

    #[test]
    fn test_parse_sort_columns() {
        for column in SortColumn::ALL {
            assert_eq!(column.as_str().parse::<SortColumn>().unwrap(), column);
        }
        assert_eq!(SortColumn::default(), SortColumn::RestaurantName);
    }

    #[test]
    fn test_reject_unknown_sort() {
        let err = "restaurant_name; DROP TABLE restaurants"
            .parse::<SortColumn>()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSort(_)));

        // Case matters; the allow-list is exact.
        assert!("Cuisine".parse::<SortColumn>().is_err());
        assert!("".parse::<SortColumn>().is_err());
    }

    #[test]
    fn test_joins_ratings_and_groups() {
        let (sql, _) = render("", SortColumn::RestaurantName);

        assert!(sql.contains(r#"INNER JOIN "ratings""#));
        assert!(sql.contains(r#"GROUP BY "restaurants"."restaurant_id""#));
        assert!(sql.contains(r#"AVG("ratings"."rating")"#));
        assert!(sql.contains(r#"AS "average_rating""#));
    }

    #[test]
    fn test_search_is_bound() {
        let (sql, values) = render("Burger", SortColumn::RestaurantName);

        assert!(sql.contains("LIKE $1"));
        assert!(!sql.contains("Burger"));
        assert_eq!(values, vec![Value::from("%Burger%")]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let (_, values) = render("", SortColumn::RestaurantName);
        assert_eq!(values, vec![Value::from("%%")]);
    }

    #[test]
    fn test_search_wildcards_are_escaped() {
        let (sql, values) = render("100%_off\\", SortColumn::RestaurantName);
        assert!(sql.contains("LIKE $1 ESCAPE"));
        assert_eq!(values, vec![Value::from(r"%100\%\_off\\%")]);
    }

    #[test]
    fn test_orders_descending_with_tie_break() {
        let (sql, _) = render("", SortColumn::Cuisine);
        assert!(sql.ends_with(
            r#"ORDER BY "restaurants"."cuisine" DESC, "restaurants"."restaurant_id" ASC"#
        ));

        let (sql, _) = render("", SortColumn::AverageRating);
        assert!(sql.contains(r#"ORDER BY "average_rating" DESC"#));
    }
}
