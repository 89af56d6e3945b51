//! Request validation and provider routing

use super::TextGenerator;
use super::catalog::{self, Provider};
use super::error::{GenerationError, GenerationResult};
use super::prompts::build_prompt;

/// One user action's worth of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub email_content: String,
    pub model_label: String,
    pub style_label: String,
}

impl GenerationRequest {
    pub fn new(
        email_content: impl Into<String>,
        model_label: impl Into<String>,
        style_label: impl Into<String>,
    ) -> Self {
        Self {
            email_content: email_content.into(),
            model_label: model_label.into(),
            style_label: style_label.into(),
        }
    }
}

/// Routes requests to the Bedrock text client or the chat client based on
/// the provider recorded on the selected model.
pub struct Dispatcher<A, B> {
    text_client: A,
    chat_client: B,
}

impl<A: TextGenerator, B: TextGenerator> Dispatcher<A, B> {
    pub fn new(text_client: A, chat_client: B) -> Self {
        Self {
            text_client,
            chat_client,
        }
    }

    /// Validate, build the prompt and call exactly one provider.
    ///
    /// Empty input and unknown labels fail before any provider is invoked.
    /// Provider results are returned unmodified.
    pub async fn generate_response(&self, request: &GenerationRequest) -> GenerationResult {
        if request.email_content.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let model = catalog::model_by_label(&request.model_label)
            .ok_or_else(|| GenerationError::UnknownModel(request.model_label.clone()))?;
        let style = catalog::style_by_label(&request.style_label)
            .ok_or_else(|| GenerationError::UnknownStyle(request.style_label.clone()))?;

        let prompt = build_prompt(&request.email_content, style);

        tracing::info!(
            model = model.label,
            provider = %model.provider,
            style = style.label,
            "generating reply"
        );

        let result = match model.provider {
            Provider::Bedrock => self.text_client.generate(&prompt, model.model_id).await,
            Provider::OpenRouter => self.chat_client.generate(&prompt, model.model_id).await,
        };

        match &result {
            Ok(text) => tracing::info!(chars = text.chars().count(), "reply generated"),
            Err(e) => tracing::warn!(kind = ?e.kind(), "generation failed"),
        }
        result
    }
}
