use utoipa::OpenApi;

use crate::application::http::analysis::router::AnalysisApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meallog API",
        description = "AI meal analysis and suggestion service",
    ),
    tags(
        (name = "analysis", description = "Meal image analysis and suggestions"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Assembles the full document and rewrites paths under the configured root.
pub fn build_openapi(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(AnalysisApiDoc::openapi());

    if !root_path.is_empty() {
        let mut paths = openapi.paths.clone();
        paths.paths = openapi
            .paths
            .paths
            .into_iter()
            .map(|(path, item)| (format!("{root_path}{path}"), item))
            .collect();
        openapi.paths = paths;
    }

    openapi
}
