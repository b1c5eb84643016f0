use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// A meal record from the user's history.
///
/// Owned by the external persistence layer; the analysis pipeline only reads
/// these as candidates for similarity and keyword matching. Macro fields are
/// optional because older entries may have been logged without an AI estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub memo: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Meal {
    pub fn new(user_id: Uuid, name: String, recorded_at: DateTime<Utc>) -> Self {
        let (_, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            name,
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            image_url: None,
            memo: None,
            recorded_at,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
