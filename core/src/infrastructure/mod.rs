pub mod llm;
pub mod meal;
