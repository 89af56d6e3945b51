//! Static model and writing-style catalogs
//!
//! Both tables are fixed at compile time and shared immutably. Their order is
//! the order the selectors show, and the first entry of each is the default.

use std::fmt;

/// Backend that serves a catalog model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Amazon Bedrock text-completion endpoint (Titan)
    Bedrock,
    /// OpenRouter OpenAI-compatible chat completions
    OpenRouter,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::Bedrock => "Amazon Bedrock",
            Provider::OpenRouter => "OpenRouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selectable model: user-facing label, provider model id and serving backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    pub label: &'static str,
    pub model_id: &'static str,
    pub provider: Provider,
}

/// A selectable writing style and the instruction it injects into the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritingStyle {
    pub label: &'static str,
    pub instruction: &'static str,
}

/// The only label served by Bedrock; every other model goes through OpenRouter.
pub const BEDROCK_MODEL_LABEL: &str = "Amazon Bedrock Titan";

pub const MODELS: &[ModelEntry] = &[
    ModelEntry {
        label: BEDROCK_MODEL_LABEL,
        model_id: "amazon.titan-text-express-v1",
        provider: Provider::Bedrock,
    },
    ModelEntry {
        label: "Gemini 2.0 Flash",
        model_id: "google/gemini-2.0-flash-thinking-exp-1219:free",
        provider: Provider::OpenRouter,
    },
    ModelEntry {
        label: "Mistral Small 3.1 24B",
        model_id: "mistralai/mistral-small-3.1-24b-instruct:free",
        provider: Provider::OpenRouter,
    },
    ModelEntry {
        label: "Microsoft Phi-3 Medium",
        model_id: "microsoft/phi-3-medium-128k-instruct:free",
        provider: Provider::OpenRouter,
    },
    ModelEntry {
        label: "DeepSeek V3",
        model_id: "deepseek/deepseek-chat:free",
        provider: Provider::OpenRouter,
    },
    ModelEntry {
        label: "Moonlight 16B",
        model_id: "moonshotai/moonlight-16b-a3b-instruct:free",
        provider: Provider::OpenRouter,
    },
];

pub const WRITING_STYLES: &[WritingStyle] = &[
    WritingStyle {
        label: "Professional",
        instruction: "Write in a professional and formal tone suitable for business communication.",
    },
    WritingStyle {
        label: "Friendly",
        instruction: "Write in a warm, friendly tone while maintaining professionalism.",
    },
    WritingStyle {
        label: "Concise",
        instruction: "Write a brief, to-the-point response that addresses the key points.",
    },
    WritingStyle {
        label: "Detailed",
        instruction: "Provide a comprehensive response with detailed explanations.",
    },
    WritingStyle {
        label: "Empathetic",
        instruction: "Show understanding and empathy in the response.",
    },
];

/// Look up a model by its exact label
pub fn model_by_label(label: &str) -> Option<&'static ModelEntry> {
    MODELS.iter().find(|m| m.label == label)
}

/// Look up a writing style by its exact label
pub fn style_by_label(label: &str) -> Option<&'static WritingStyle> {
    WRITING_STYLES.iter().find(|s| s.label == label)
}

pub fn model_index(label: &str) -> Option<usize> {
    MODELS.iter().position(|m| m.label == label)
}

pub fn style_index(label: &str) -> Option<usize> {
    WRITING_STYLES.iter().position(|s| s.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_only_titan_is_served_by_bedrock() {
        let bedrock: Vec<_> = MODELS
            .iter()
            .filter(|m| m.provider == Provider::Bedrock)
            .map(|m| m.label)
            .collect();
        assert_eq!(bedrock, vec![BEDROCK_MODEL_LABEL]);
    }

    #[test]
    fn test_labels_are_unique() {
        let models: HashSet<_> = MODELS.iter().map(|m| m.label).collect();
        assert_eq!(models.len(), MODELS.len());

        let styles: HashSet<_> = WRITING_STYLES.iter().map(|s| s.label).collect();
        assert_eq!(styles.len(), WRITING_STYLES.len());
    }

    #[test]
    fn test_lookup_by_label() {
        let titan = model_by_label("Amazon Bedrock Titan").unwrap();
        assert_eq!(titan.model_id, "amazon.titan-text-express-v1");

        let deepseek = model_by_label("DeepSeek V3").unwrap();
        assert_eq!(deepseek.model_id, "deepseek/deepseek-chat:free");
        assert_eq!(deepseek.provider, Provider::OpenRouter);

        assert!(model_by_label("amazon bedrock titan").is_none());
        assert!(style_by_label("Sarcastic").is_none());
        assert_eq!(
            style_by_label("Empathetic").unwrap().instruction,
            "Show understanding and empathy in the response."
        );
    }

    #[test]
    fn test_defaults_are_first_entries() {
        assert_eq!(model_index(BEDROCK_MODEL_LABEL), Some(0));
        assert_eq!(style_index("Professional"), Some(0));
        assert_eq!(style_index("Empathetic"), Some(WRITING_STYLES.len() - 1));
    }
}
