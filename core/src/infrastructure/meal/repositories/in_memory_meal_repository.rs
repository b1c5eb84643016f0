use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal::{entities::Meal, ports::MealRepository},
};

/// In-process stand-in for the managed persistence platform that owns meal
/// records in production. Keeps the candidate-pool boundary honest (newest
/// first, bounded window) and makes the pipeline runnable without external
/// services; seedable for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMealRepository {
    meals: Arc<RwLock<Vec<Meal>>>,
}

impl InMemoryMealRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(meals: Vec<Meal>) -> Self {
        Self {
            meals: Arc::new(RwLock::new(meals)),
        }
    }

    pub async fn insert(&self, meal: Meal) {
        self.meals.write().await.push(meal);
    }
}

impl MealRepository for InMemoryMealRepository {
    async fn list_recent(&self, user_id: Uuid, limit: usize) -> Result<Vec<Meal>, CoreError> {
        let meals = self.meals.read().await;

        let mut recent: Vec<Meal> = meals
            .iter()
            .filter(|meal| meal.user_id == user_id)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        recent.truncate(limit);

        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn meal_at(user_id: Uuid, name: &str, days_ago: i64) -> Meal {
        Meal::new(
            user_id,
            name.to_string(),
            Utc::now() - Duration::days(days_ago),
        )
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_bounded() {
        let user_id = Uuid::new_v4();
        let repository = InMemoryMealRepository::seeded(vec![
            meal_at(user_id, "oldest", 3),
            meal_at(user_id, "newest", 0),
            meal_at(user_id, "middle", 1),
            meal_at(Uuid::new_v4(), "someone else", 0),
        ]);

        let meals = repository.list_recent(user_id, 2).await.unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "newest");
        assert_eq!(meals[1].name, "middle");
    }

    #[tokio::test]
    async fn test_insert_is_visible_to_list_recent() {
        let user_id = Uuid::new_v4();
        let repository = InMemoryMealRepository::new();
        repository.insert(meal_at(user_id, "lunch", 0)).await;

        let meals = repository.list_recent(user_id, 10).await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "lunch");
    }
}
