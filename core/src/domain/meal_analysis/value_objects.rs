use std::time::Duration;

/// Detail-level hint forwarded to the vision API. `Low` keeps pairwise
/// comparisons cheap and fast; the primary estimate uses `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDetail {
    Low,
    High,
}

impl ImageDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDetail::Low => "low",
            ImageDetail::High => "high",
        }
    }
}

/// One part of the user message sent to the vision model, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionPart {
    Text(String),
    ImageUrl { url: String, detail: ImageDetail },
}

/// A single strict-JSON completion request against the vision model.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    pub system_prompt: String,
    pub parts: Vec<VisionPart>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AnalyzeMealInput {
    pub image_url: String,
    pub additional_context: Option<String>,
    /// When set, the result is enriched with similar past meals pulled from
    /// the caller's history. Enrichment failures never fail the analysis.
    pub include_suggestions: bool,
}

#[derive(Debug, Clone)]
pub struct SuggestMealsInput {
    pub query: String,
    /// Caps how many candidates are fetched from the history *before*
    /// scoring, so the final list can come up short even when more matching
    /// meals exist beyond the fetch window. Kept as observed in production.
    pub limit: Option<usize>,
}

impl SuggestMealsInput {
    pub const DEFAULT_LIMIT: usize = 5;
}

/// Tuning knobs for the similarity ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilaritySearchOptions {
    /// Candidates scoring below this are dropped. Inclusive bound.
    pub min_similarity: f64,
    /// Result cap applied after sorting. Zero yields an empty list.
    pub max_results: usize,
    /// How many recent meals to pull as the candidate pool.
    pub candidate_pool: usize,
    /// Upper bound on concurrent pairwise comparisons, to stay clear of
    /// upstream rate limits.
    pub max_concurrency: usize,
    /// Per-comparison deadline; a hung call only costs its own candidate.
    pub compare_timeout: Duration,
}

impl Default for SimilaritySearchOptions {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            max_results: 3,
            candidate_pool: 10,
            max_concurrency: 4,
            compare_timeout: Duration::from_secs(8),
        }
    }
}
