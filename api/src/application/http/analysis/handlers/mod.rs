pub mod analyze_meal_image;
pub mod get_meal_suggestions;
