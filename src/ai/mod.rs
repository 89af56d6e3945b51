//! Reply generation
//!
//! Catalogs and the prompt template are pure data. The two provider clients
//! sit behind [`TextGenerator`], and the [`Dispatcher`] picks one per request
//! from the provider recorded on the selected model. The TUI talks to the
//! dispatcher through the actor so the interface keeps rendering while a
//! request is in flight.

mod actor;
mod bedrock;
pub mod catalog;
mod dispatcher;
pub mod error;
mod openrouter;
mod prompts;
pub mod sigv4;

use std::future::Future;

pub use actor::{AiActorHandle, AiCommand, AiEvent, spawn_ai_actor};
pub use bedrock::BedrockClient;
pub use catalog::{MODELS, Provider, WRITING_STYLES};
pub use dispatcher::{Dispatcher, GenerationRequest};
pub use error::{ErrorKind, GenerationResult, display_text};
pub use openrouter::OpenRouterClient;

#[cfg(test)]
pub(crate) use dispatcher::tests::FakeGenerator;

/// A backend that turns one prompt into one completion.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        model_id: &str,
    ) -> impl Future<Output = GenerationResult> + Send;
}
