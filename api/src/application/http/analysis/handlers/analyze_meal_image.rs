use std::time::Instant;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meallog_core::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::MealAnalysis, ports::MealAnalysisService, value_objects::AnalyzeMealInput,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{analysis::validators::AnalyzeMealRequest, server::app_state::AppState},
};

/// Envelope returned for both success and failure so clients always get a
/// uniform shape plus the measured processing time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMealResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MealAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processing_time_ms: u64,
}

fn failure_status(error: &CoreError) -> StatusCode {
    match error {
        CoreError::InvalidImage(_) => StatusCode::BAD_REQUEST,
        CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[utoipa::path(
    post,
    path = "/api/ai/analyze-meal",
    tag = "analysis",
    summary = "Analyze a meal photo",
    description = "Runs the vision model over an uploaded meal photo and returns a nutritional estimate, optionally enriched with similar past meals",
    request_body = AnalyzeMealRequest,
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, body = AnalyzeMealResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, body = AnalyzeMealResponse),
    ),
)]
pub async fn analyze_meal_image(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(request): Json<AnalyzeMealRequest>,
) -> Response {
    let started = Instant::now();

    if let Err(e) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnalyzeMealResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
                processing_time_ms: started.elapsed().as_millis() as u64,
            }),
        )
            .into_response();
    }

    let input = AnalyzeMealInput {
        image_url: request.image_url,
        additional_context: request.additional_context,
        include_suggestions: request.include_suggestions,
    };

    match state.service.analyze_meal_image(identity, input).await {
        Ok(analysis) => (
            StatusCode::OK,
            Json(AnalyzeMealResponse {
                success: true,
                data: Some(analysis),
                error: None,
                processing_time_ms: started.elapsed().as_millis() as u64,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Meal analysis failed: {}", e);
            (
                failure_status(&e),
                Json(AnalyzeMealResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                    processing_time_ms: started.elapsed().as_millis() as u64,
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status_mapping() {
        assert_eq!(
            failure_status(&CoreError::InvalidImage("missing".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure_status(&CoreError::Unauthorized),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            failure_status(&CoreError::RateLimited),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            failure_status(&CoreError::MalformedResponse("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let envelope = AnalyzeMealResponse {
            success: false,
            data: None,
            error: Some("boom".to_string()),
            processing_time_ms: 12,
        };
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert_eq!(json["processingTimeMs"], 12);
        assert!(json.get("data").is_none());
    }
}
