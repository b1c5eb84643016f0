pub mod common;
pub mod meal;
pub mod meal_analysis;
