use crate::domain::common::{MeallogConfig, services::Service};
use crate::infrastructure::{
    llm::OpenAiVisionClient, meal::repositories::InMemoryMealRepository,
};

/// Concrete service type used by the HTTP layer.
pub type MeallogService = Service<OpenAiVisionClient, InMemoryMealRepository>;

pub fn create_service(config: MeallogConfig) -> anyhow::Result<MeallogService> {
    let vision_client = OpenAiVisionClient::new(config.llm);
    let meal_repository = InMemoryMealRepository::new();

    Ok(Service::new(vision_client, meal_repository))
}
