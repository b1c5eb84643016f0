use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal::entities::Meal;

/// Nutritional estimate produced by the vision model for one image.
///
/// Numeric fields are the model's own output, clamped to non-negative values
/// (confidence to [0,1]) at decode time but otherwise not re-validated.
/// `alternatives` keeps the model's ordering; it is not re-sorted by
/// confidence here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealAnalysis {
    pub name: String,
    pub description: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub confidence: f64,
    pub alternatives: Vec<AlternativeCandidate>,
    pub portion_size: Option<String>,
    pub ingredients: Vec<String>,
    /// Similar past meals, present only when suggestion enrichment ran.
    pub past_meal_suggestions: Vec<SimilarMeal>,
}

/// Alternative interpretation of an ambiguous image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlternativeCandidate {
    pub name: String,
    pub calories: f64,
    pub confidence: f64,
}

/// Model verdict on how close two meal images are. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageSimilarity {
    pub similarity_score: f64,
    pub reasoning: String,
    pub food_category_match: bool,
    pub visual_similarity: f64,
}

/// Past meal ranked by image similarity against the uploaded photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimilarMeal {
    pub meal: Meal,
    pub similarity_score: f64,
    pub similarity_reasoning: String,
    pub visual_similarity: f64,
    pub food_category_match: bool,
}

/// Past meal ranked by keyword match count against a text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealSuggestion {
    pub meal: Meal,
    pub match_score: u32,
}
