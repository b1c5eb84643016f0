use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::entities::{AlternativeCandidate, ImageSimilarity, MealAnalysis},
};

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    name: String,
    description: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    confidence: f64,
    #[serde(default)]
    alternatives: Vec<RawAlternative>,
    #[serde(default, alias = "portionSize")]
    portion_size: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    name: String,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct RawSimilarity {
    similarity_score: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    food_category_match: bool,
    #[serde(default)]
    visual_similarity: f64,
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Strict decode of the analysis payload. Any parse failure or missing
/// required field is a `MalformedResponse`; no partial recovery is attempted.
/// Negative macro values are clamped to zero, confidence to [0,1].
pub fn decode_analysis(raw: &str) -> Result<MealAnalysis, CoreError> {
    let parsed: RawAnalysis = serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Failed to parse analysis response: {}", e);
        CoreError::MalformedResponse(e.to_string())
    })?;

    if parsed.name.trim().is_empty() {
        return Err(CoreError::MalformedResponse(
            "dish name is empty".to_string(),
        ));
    }

    let alternatives = parsed
        .alternatives
        .into_iter()
        .map(|alt| AlternativeCandidate {
            name: alt.name,
            calories: clamp_non_negative(alt.calories),
            confidence: clamp_unit(alt.confidence),
        })
        .collect();

    Ok(MealAnalysis {
        name: parsed.name,
        description: parsed.description,
        calories: clamp_non_negative(parsed.calories),
        protein: clamp_non_negative(parsed.protein),
        carbs: clamp_non_negative(parsed.carbs),
        fat: clamp_non_negative(parsed.fat),
        confidence: clamp_unit(parsed.confidence),
        alternatives,
        portion_size: parsed.portion_size,
        ingredients: parsed.ingredients,
        past_meal_suggestions: Vec::new(),
    })
}

/// Lenient decode of the pairwise-comparison payload. Similarity is a
/// best-effort signal, so any decode failure yields `None` instead of an
/// error. Scores pass through unchanged apart from range clamping.
pub fn decode_similarity(raw: &str) -> Option<ImageSimilarity> {
    let parsed: RawSimilarity = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Ignoring unparseable similarity response: {}", e);
            return None;
        }
    };

    Some(ImageSimilarity {
        similarity_score: clamp_unit(parsed.similarity_score),
        reasoning: parsed.reasoning,
        food_category_match: parsed.food_category_match,
        visual_similarity: clamp_unit(parsed.visual_similarity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_analysis() {
        let raw = r#"{
            "name": "親子丼",
            "description": "鶏肉と卵の丼",
            "calories": 550,
            "protein": 30.5,
            "carbs": 70.0,
            "fat": 15.2,
            "confidence": 0.85,
            "alternatives": [
                {"name": "カツ丼", "calories": 800, "confidence": 0.4}
            ],
            "portion_size": "1人前",
            "ingredients": ["鶏肉", "卵", "ご飯"]
        }"#;

        let analysis = decode_analysis(raw).unwrap();
        assert_eq!(analysis.name, "親子丼");
        assert_eq!(analysis.calories, 550.0);
        assert_eq!(analysis.alternatives.len(), 1);
        assert_eq!(analysis.portion_size.as_deref(), Some("1人前"));
        assert!(analysis.past_meal_suggestions.is_empty());
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let raw = r#"{
            "name": "Salad",
            "description": "Green salad",
            "calories": 150,
            "protein": 4,
            "carbs": 10,
            "fat": 8,
            "confidence": 0.9
        }"#;

        let analysis = decode_analysis(raw).unwrap();
        assert!(analysis.alternatives.is_empty());
        assert!(analysis.ingredients.is_empty());
        assert_eq!(analysis.portion_size, None);
    }

    #[test]
    fn test_negative_macros_clamped_to_zero() {
        let raw = r#"{
            "name": "Soup",
            "description": "",
            "calories": -120,
            "protein": -1,
            "carbs": 5,
            "fat": 2,
            "confidence": 1.4
        }"#;

        let analysis = decode_analysis(raw).unwrap();
        assert_eq!(analysis.calories, 0.0);
        assert_eq!(analysis.protein, 0.0);
        assert_eq!(analysis.carbs, 5.0);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn test_non_json_is_malformed_response() {
        let err = decode_analysis("I could not identify the dish.").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_required_field_is_malformed_response() {
        let raw = r#"{"name": "Ramen", "description": "", "calories": 600}"#;
        let err = decode_analysis(raw).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_name_is_malformed_response() {
        let raw = r#"{
            "name": "  ",
            "description": "",
            "calories": 1,
            "protein": 1,
            "carbs": 1,
            "fat": 1,
            "confidence": 0.5
        }"#;
        let err = decode_analysis(raw).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn test_similarity_scores_pass_through() {
        let raw = r#"{
            "similarity_score": 0.95,
            "reasoning": "Both are ramen bowls",
            "food_category_match": true,
            "visual_similarity": 0.9
        }"#;

        let similarity = decode_similarity(raw).unwrap();
        assert_eq!(similarity.similarity_score, 0.95);
        assert_eq!(similarity.visual_similarity, 0.9);
        assert!(similarity.food_category_match);
    }

    #[test]
    fn test_similarity_decode_failure_yields_none() {
        assert!(decode_similarity("not json").is_none());
        assert!(decode_similarity(r#"{"reasoning": "no score"}"#).is_none());
    }
}
