use crate::domain::{
    meal::ports::MealRepository,
    meal_analysis::{ports::VisionClient, value_objects::SimilaritySearchOptions},
};

/// Concrete service wiring the domain trait implementations to their
/// collaborators. Trait impls live next to their domain module
/// (`meal_analysis::services`).
#[derive(Debug, Clone)]
pub struct Service<V, M>
where
    V: VisionClient,
    M: MealRepository,
{
    pub(crate) vision_client: V,
    pub(crate) meal_repository: M,
    pub(crate) similarity_options: SimilaritySearchOptions,
}

impl<V, M> Service<V, M>
where
    V: VisionClient,
    M: MealRepository,
{
    pub fn new(vision_client: V, meal_repository: M) -> Self {
        Self {
            vision_client,
            meal_repository,
            similarity_options: SimilaritySearchOptions::default(),
        }
    }

    pub fn with_similarity_options(mut self, options: SimilaritySearchOptions) -> Self {
        self.similarity_options = options;
        self
    }
}
