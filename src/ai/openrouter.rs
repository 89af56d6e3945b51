//! OpenRouter API client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use super::catalog::Provider;
use super::error::{GenerationError, GenerationResult};

/// OpenRouter API client for chat completions
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    referer: Option<String>,
    app_title: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            referer: None,
            app_title: None,
        }
    }

    /// Attribution headers OpenRouter uses for its app rankings
    pub fn with_attribution(mut self, referer: Option<String>, app_title: Option<String>) -> Self {
        self.referer = referer;
        self.app_title = app_title;
        self
    }

    /// Send a single-message chat completion request
    pub async fn complete(&self, model_id: &str, user_content: &str) -> GenerationResult {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredentials(Provider::OpenRouter))?;

        let request = ChatRequest {
            model: model_id,
            messages: vec![Message {
                role: "user",
                content: user_content,
            }],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json");
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title);
        }

        tracing::debug!(model_id, "sending OpenRouter chat completion");

        let response = builder.json(&request).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), model_id, "OpenRouter request failed");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::Parse(format!("failed to parse OpenRouter response: {}", e))
        })?;

        match chat_response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => match chat_response.error {
                // Upstream provider failures can arrive with a 200 status
                Some(error) => Err(GenerationError::Api {
                    status: error.code.unwrap_or(status.as_u16()),
                    body: error.message.unwrap_or(text),
                }),
                None => Err(GenerationError::Parse(
                    "No response content from model".to_string(),
                )),
            },
        }
    }
}

impl TextGenerator for OpenRouterClient {
    async fn generate(&self, prompt: &str, model_id: &str) -> GenerationResult {
        self.complete(model_id, prompt).await
    }
}
