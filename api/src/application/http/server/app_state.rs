use std::sync::Arc;

use meallog_core::application::MeallogService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MeallogService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MeallogService) -> Self {
        Self { args, service }
    }
}
