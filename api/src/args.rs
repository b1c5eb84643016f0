use clap::Parser;
use meallog_core::domain::common::{LlmConfig, MeallogConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "meallog-api", about = "Meallog API server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "3333")]
    pub port: u16,

    /// Prefix prepended to every route, e.g. "/meallog".
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long, env = "OPENAI_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base_url: String,

    #[arg(long, env = "OPENAI_API_KEY")]
    pub api_key: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o")]
    pub model: String,
}

impl From<Args> for MeallogConfig {
    fn from(args: Args) -> Self {
        MeallogConfig {
            llm: LlmConfig {
                api_base_url: args.llm.api_base_url,
                api_key: args.llm.api_key,
                model: args.llm.model,
            },
        }
    }
}
