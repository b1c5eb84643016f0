use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMealRequest {
    /// URL of the uploaded meal photo, resolvable by the vision API.
    #[serde(default)]
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,

    /// Free-text hints forwarded into the analysis prompt.
    #[validate(length(max = 2000, message = "additionalContext is too long"))]
    pub additional_context: Option<String>,

    /// Enrich the result with similar meals from the caller's history.
    #[serde(default)]
    pub include_suggestions: bool,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MealSuggestionsParams {
    /// Keyword query matched against past meal names.
    #[schema(example = "chicken salad")]
    pub q: String,

    /// How many candidates to fetch from the history before scoring.
    #[schema(example = 5)]
    pub limit: Option<usize>,
}
