use std::future::Future;
use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, meal::entities::Meal};

/// Read-only boundary to the external persistence layer.
///
/// The pipeline never writes meals; it only pulls a bounded, newest-first
/// window of a user's history to use as a candidate pool.
#[cfg_attr(test, mockall::automock)]
pub trait MealRepository: Send + Sync {
    fn list_recent(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Meal>, CoreError>> + Send;
}
