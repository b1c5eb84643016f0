pub mod in_memory_meal_repository;

pub use in_memory_meal_repository::InMemoryMealRepository;
