use std::future::Future;

use crate::domain::{
    common::{Identity, entities::app_errors::CoreError},
    meal_analysis::{
        entities::{MealAnalysis, MealSuggestion},
        value_objects::{AnalyzeMealInput, SuggestMealsInput, VisionRequest},
    },
};

/// Boundary to the multimodal completion API.
///
/// Implementations must force strict-JSON output and return the raw text
/// payload; decoding and validation stay in the domain layer. Exactly one
/// outbound call per invocation, no internal retries.
#[cfg_attr(test, mockall::automock)]
pub trait VisionClient: Send + Sync {
    fn complete_json(
        &self,
        request: VisionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the meal analysis pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait MealAnalysisService: Send + Sync {
    /// Primary nutrition estimate for an uploaded image. Failures propagate;
    /// a failed analysis must be visible to the end user.
    fn analyze_meal_image(
        &self,
        identity: Identity,
        input: AnalyzeMealInput,
    ) -> impl Future<Output = Result<MealAnalysis, CoreError>> + Send;

    /// Keyword-ranked suggestions from the caller's meal history.
    fn suggest_meals_by_keyword(
        &self,
        identity: Identity,
        input: SuggestMealsInput,
    ) -> impl Future<Output = Result<Vec<MealSuggestion>, CoreError>> + Send;
}
