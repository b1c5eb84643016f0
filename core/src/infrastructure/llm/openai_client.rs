use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LlmConfig, entities::app_errors::CoreError},
    meal_analysis::{
        ports::VisionClient,
        value_objects::{VisionPart, VisionRequest},
    },
};

/// Vision client for an OpenAI-compatible chat-completions endpoint.
///
/// One configured `reqwest::Client` is owned per instance and reused across
/// calls; callers inject the client rather than relying on process-global
/// state. Strict-JSON output is requested via `response_format`.
#[derive(Debug, Clone)]
pub struct OpenAiVisionClient {
    api_base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrlPart },
}

#[derive(Debug, Serialize)]
struct ImageUrlPart {
    url: String,
    detail: &'static str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn is_rate_limit_message(message: &str) -> bool {
    message.to_lowercase().contains("rate limit")
}

impl OpenAiVisionClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
            client: Client::new(),
        }
    }

    fn build_request(&self, request: VisionRequest) -> ChatRequest {
        let parts = request
            .parts
            .into_iter()
            .map(|part| match part {
                VisionPart::Text(text) => ContentPart::Text { text },
                VisionPart::ImageUrl { url, detail } => ContentPart::ImageUrl {
                    image_url: ImageUrlPart {
                        url,
                        detail: detail.as_str(),
                    },
                },
            })
            .collect();

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(parts),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

impl VisionClient for OpenAiVisionClient {
    async fn complete_json(&self, request: VisionRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.api_base_url);
        let body = self.build_request(request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Vision API request failed: {}", e);
                CoreError::UpstreamError(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, error_text);

            if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_message(&error_text) {
                return Err(CoreError::RateLimited);
            }
            return Err(CoreError::UpstreamError(format!(
                "{status} - {error_text}"
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse vision API envelope: {}", e);
            CoreError::UpstreamError(format!("invalid response envelope: {e}"))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| CoreError::UpstreamError("no response content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_analysis::value_objects::ImageDetail;

    #[test]
    fn test_rate_limit_detection_is_case_insensitive() {
        assert!(is_rate_limit_message("Rate Limit exceeded for gpt-4o"));
        assert!(is_rate_limit_message("429: rate limit reached"));
        assert!(!is_rate_limit_message("model overloaded"));
    }

    #[test]
    fn test_request_serialization_shape() {
        let client = OpenAiVisionClient::new(LlmConfig {
            api_base_url: "https://api.openai.com/v1/".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
        });

        let body = client.build_request(VisionRequest {
            system_prompt: "system".to_string(),
            parts: vec![
                VisionPart::Text("look at this".to_string()),
                VisionPart::ImageUrl {
                    url: "https://cdn.example.com/meal.jpg".to_string(),
                    detail: ImageDetail::High,
                },
            ],
            max_tokens: 1200,
            temperature: 0.3,
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["detail"],
            "high"
        );
        assert_eq!(json["max_tokens"], 1200);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAiVisionClient::new(LlmConfig {
            api_base_url: "https://api.openai.com/v1///".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
        });
        assert_eq!(client.api_base_url, "https://api.openai.com/v1");
    }
}
