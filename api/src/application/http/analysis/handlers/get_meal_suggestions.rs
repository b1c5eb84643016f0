use axum::extract::{Query, State};
use meallog_core::domain::meal_analysis::{
    entities::MealSuggestion, ports::MealAnalysisService, value_objects::SuggestMealsInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        analysis::validators::MealSuggestionsParams,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MealSuggestionsResponse {
    pub suggestions: Vec<MealSuggestion>,
}

#[utoipa::path(
    get,
    path = "/api/meals/suggestions",
    tag = "analysis",
    summary = "Suggest past meals by keyword",
    description = "Scores the caller's recent meals against a keyword query and returns them best match first",
    responses(
        (status = 200, body = MealSuggestionsResponse),
        (status = 400, description = "Empty query"),
        (status = 401, description = "Missing or invalid credentials"),
    ),
    params(MealSuggestionsParams),
)]
pub async fn get_meal_suggestions(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Query(params): Query<MealSuggestionsParams>,
) -> Result<Response<MealSuggestionsResponse>, ApiError> {
    let suggestions = state
        .service
        .suggest_meals_by_keyword(
            identity,
            SuggestMealsInput {
                query: params.q,
                limit: params.limit,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(MealSuggestionsResponse { suggestions }))
}
