use std::cmp::Ordering;

use futures::StreamExt;

use crate::domain::{
    common::{Identity, entities::app_errors::CoreError, services::Service},
    meal::{entities::Meal, ports::MealRepository},
    meal_analysis::{
        decode,
        entities::{ImageSimilarity, MealAnalysis, MealSuggestion, SimilarMeal},
        ports::{MealAnalysisService, VisionClient},
        prompts::{IMAGE_SIMILARITY_PROMPT, MEAL_ANALYSIS_USER_PROMPT, build_analysis_prompt},
        value_objects::{
            AnalyzeMealInput, ImageDetail, SuggestMealsInput, VisionPart, VisionRequest,
        },
    },
};

const ANALYSIS_MAX_TOKENS: u32 = 1200;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const SIMILARITY_MAX_TOKENS: u32 = 300;
const SIMILARITY_TEMPERATURE: f32 = 0.1;

fn validate_image_url(image_url: &str) -> Result<(), CoreError> {
    let trimmed = image_url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidImage("image URL is required".to_string()));
    }

    let has_known_scheme = trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("data:");
    if !has_known_scheme {
        return Err(CoreError::InvalidImage(format!(
            "unsupported image reference: {trimmed}"
        )));
    }

    Ok(())
}

/// Keyword scoring over an already-fetched candidate window.
///
/// Score is the number of case-folded token hits in the meal name, plus one
/// when the whole query is a substring. Zero-score candidates are dropped;
/// ties keep the fetch order (newest first).
fn score_keyword_matches(query: &str, candidates: Vec<Meal>) -> Vec<MealSuggestion> {
    let query_lower = query.to_lowercase();
    let keywords: Vec<String> = query
        .split_whitespace()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let mut scored: Vec<MealSuggestion> = candidates
        .into_iter()
        .filter_map(|meal| {
            let name_lower = meal.name.to_lowercase();
            let matched_keywords = keywords
                .iter()
                .filter(|keyword| name_lower.contains(keyword.as_str()))
                .count() as u32;
            let exact_match_bonus = u32::from(name_lower.contains(&query_lower));

            let match_score = matched_keywords + exact_match_bonus;
            (match_score > 0).then_some(MealSuggestion { meal, match_score })
        })
        .collect();

    // sort_by is stable, so equal scores keep their fetch order
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}

impl<V, M> Service<V, M>
where
    V: VisionClient,
    M: MealRepository,
{
    /// Compares the two images with one low-detail model call.
    ///
    /// Best-effort by contract: transport errors, unparseable output and
    /// timeouts all collapse to `None` so a single bad comparison never
    /// breaks a batch.
    pub async fn compare_images(
        &self,
        current_image_url: &str,
        past_image_url: &str,
    ) -> Option<ImageSimilarity> {
        let request = VisionRequest {
            system_prompt: IMAGE_SIMILARITY_PROMPT.to_string(),
            parts: vec![
                VisionPart::Text(
                    "Compare these two food images and rate their similarity:".to_string(),
                ),
                VisionPart::Text("Current image:".to_string()),
                VisionPart::ImageUrl {
                    url: current_image_url.to_string(),
                    detail: ImageDetail::Low,
                },
                VisionPart::Text("Past image to compare:".to_string()),
                VisionPart::ImageUrl {
                    url: past_image_url.to_string(),
                    detail: ImageDetail::Low,
                },
            ],
            max_tokens: SIMILARITY_MAX_TOKENS,
            temperature: SIMILARITY_TEMPERATURE,
        };

        let call = self.vision_client.complete_json(request);
        match tokio::time::timeout(self.similarity_options.compare_timeout, call).await {
            Ok(Ok(raw)) => decode::decode_similarity(&raw),
            Ok(Err(e)) => {
                tracing::warn!("Image comparison failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.similarity_options.compare_timeout.as_millis() as u64,
                    "Image comparison timed out"
                );
                None
            }
        }
    }

    /// Ranks past meals by image similarity against the current upload.
    ///
    /// Pairwise comparisons fan out with bounded concurrency and no ordering
    /// constraint between them; ranking happens only after all of them
    /// resolve. Candidates without an image, with a failed comparison or
    /// scoring below `min_similarity` are dropped silently.
    pub async fn find_similar_meals(
        &self,
        current_image_url: &str,
        candidates: Vec<Meal>,
    ) -> Vec<SimilarMeal> {
        let options = &self.similarity_options;
        if options.max_results == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let comparisons = candidates
            .into_iter()
            .enumerate()
            .filter_map(|(index, meal)| {
                let image_url = meal.image_url.clone()?;
                Some(async move {
                    let similarity = self.compare_images(current_image_url, &image_url).await?;
                    if similarity.similarity_score < options.min_similarity {
                        return None;
                    }
                    Some((
                        index,
                        SimilarMeal {
                            meal,
                            similarity_score: similarity.similarity_score,
                            similarity_reasoning: similarity.reasoning,
                            visual_similarity: similarity.visual_similarity,
                            food_category_match: similarity.food_category_match,
                        },
                    ))
                })
            });

        let mut ranked: Vec<(usize, SimilarMeal)> = futures::stream::iter(comparisons)
            .buffer_unordered(options.max_concurrency.max(1))
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;

        // Restore submission order first so the score sort below breaks ties
        // by original candidate position.
        ranked.sort_by_key(|(index, _)| *index);
        ranked.sort_by(|(_, a), (_, b)| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(Ordering::Equal)
        });

        ranked
            .into_iter()
            .map(|(_, similar)| similar)
            .take(options.max_results)
            .collect()
    }
}

impl<V, M> MealAnalysisService for Service<V, M>
where
    V: VisionClient,
    M: MealRepository,
{
    async fn analyze_meal_image(
        &self,
        identity: Identity,
        input: AnalyzeMealInput,
    ) -> Result<MealAnalysis, CoreError> {
        validate_image_url(&input.image_url)?;

        let request = VisionRequest {
            system_prompt: build_analysis_prompt(input.additional_context.as_deref()),
            parts: vec![
                VisionPart::Text(MEAL_ANALYSIS_USER_PROMPT.to_string()),
                VisionPart::ImageUrl {
                    url: input.image_url.clone(),
                    detail: ImageDetail::High,
                },
            ],
            max_tokens: ANALYSIS_MAX_TOKENS,
            temperature: ANALYSIS_TEMPERATURE,
        };

        let raw = self.vision_client.complete_json(request).await?;
        let mut analysis = decode::decode_analysis(&raw)?;

        if input.include_suggestions {
            // Enrichment only; a failure here shortens the list, it never
            // fails the primary analysis.
            match self
                .meal_repository
                .list_recent(identity.id(), self.similarity_options.candidate_pool)
                .await
            {
                Ok(candidates) => {
                    analysis.past_meal_suggestions =
                        self.find_similar_meals(&input.image_url, candidates).await;
                }
                Err(e) => {
                    tracing::warn!("Skipping past-meal suggestions: {}", e);
                }
            }
        }

        Ok(analysis)
    }

    async fn suggest_meals_by_keyword(
        &self,
        identity: Identity,
        input: SuggestMealsInput,
    ) -> Result<Vec<MealSuggestion>, CoreError> {
        let query = input.query.trim();
        if query.is_empty() {
            return Err(CoreError::InvalidQuery);
        }

        // The limit caps the fetch window, not the scored output; scoring can
        // leave fewer results than the caller asked for.
        let limit = input.limit.unwrap_or(SuggestMealsInput::DEFAULT_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = self
            .meal_repository
            .list_recent(identity.id(), limit)
            .await?;

        Ok(score_keyword_matches(query, candidates))
    }
}
