use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_meal_image::{__path_analyze_meal_image, analyze_meal_image},
    get_meal_suggestions::{__path_get_meal_suggestions, get_meal_suggestions},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(analyze_meal_image, get_meal_suggestions))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/ai/analyze-meal", state.args.server.root_path),
            post(analyze_meal_image),
        )
        .route(
            &format!("{}/api/meals/suggestions", state.args.server.root_path),
            get(get_meal_suggestions),
        )
        .layer(middleware::from_fn(auth))
}
