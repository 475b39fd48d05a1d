pub mod area;
pub mod rating;
pub mod restaurant;
