use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ai::catalog;

/// Region used when neither the config nor the environment names one
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bedrock: BedrockConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Amazon Bedrock settings. Credentials never live here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BedrockConfig {
    /// AWS region (falls back to AWS_REGION, AWS_DEFAULT_REGION, then us-east-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Runtime endpoint override, e.g. a VPC endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl BedrockConfig {
    pub fn resolve_region(&self) -> String {
        self.region
            .clone()
            .or_else(|| non_empty_env("AWS_REGION"))
            .or_else(|| non_empty_env("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,
    /// Sent as HTTP-Referer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Sent as X-Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_openrouter_base_url(),
            referer: None,
            app_title: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Model label selected at startup and after a clear
    #[serde(default = "default_model_label")]
    pub default_model: String,
    /// Writing style label selected at startup and after a clear
    #[serde(default = "default_style_label")]
    pub default_style: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            default_model: default_model_label(),
            default_style: default_style_label(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Modern,
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

fn default_openrouter_base_url() -> String {
    DEFAULT_OPENROUTER_BASE_URL.to_string()
}

fn default_model_label() -> String {
    catalog::MODELS[0].label.to_string()
}

fn default_style_label() -> String {
    catalog::WRITING_STYLES[0].label.to_string()
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("riposte");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("riposte.log"))
    }

    /// Load the config file, or defaults when there is none
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate TOML config text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Default selections must name catalog entries
    pub fn validate(&self) -> Result<()> {
        if catalog::model_by_label(&self.ui.default_model).is_none() {
            let known: Vec<_> = catalog::MODELS.iter().map(|m| m.label).collect();
            anyhow::bail!(
                "ui.default_model \"{}\" is not a known model (expected one of: {})",
                self.ui.default_model,
                known.join(", ")
            );
        }
        if catalog::style_by_label(&self.ui.default_style).is_none() {
            let known: Vec<_> = catalog::WRITING_STYLES.iter().map(|s| s.label).collect();
            anyhow::bail!(
                "ui.default_style \"{}\" is not a known writing style (expected one of: {})",
                self.ui.default_style,
                known.join(", ")
            );
        }
        if self.openrouter.base_url.trim().is_empty() {
            anyhow::bail!("openrouter.base_url must not be empty");
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = Self::config_dir()?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs() -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.ui.theme, ThemeVariant::Modern);
        assert_eq!(config.ui.default_model, "Amazon Bedrock Titan");
        assert_eq!(config.ui.default_style, "Professional");
        assert_eq!(config.openrouter.base_url, "https://openrouter.ai/api/v1");
        assert!(config.bedrock.region.is_none());
        assert!(config.bedrock.endpoint.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [bedrock]
            region = "eu-central-1"
            endpoint = "https://vpce-123.bedrock-runtime.eu-central-1.vpce.amazonaws.com"

            [openrouter]
            base_url = "http://localhost:8080/v1"
            referer = "https://example.com"
            app_title = "riposte"

            [ui]
            theme = "high-contrast"
            default_model = "DeepSeek V3"
            default_style = "Empathetic"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.bedrock.region.as_deref(), Some("eu-central-1"));
        assert_eq!(config.bedrock.resolve_region(), "eu-central-1");
        assert_eq!(config.openrouter.base_url, "http://localhost:8080/v1");
        assert_eq!(config.openrouter.referer.as_deref(), Some("https://example.com"));
        assert_eq!(config.openrouter.app_title.as_deref(), Some("riposte"));
        assert_eq!(config.ui.theme, ThemeVariant::HighContrast);
        assert_eq!(config.ui.default_model, "DeepSeek V3");
        assert_eq!(config.ui.default_style, "Empathetic");
    }

    #[test]
    fn test_unknown_default_model_fails_fast() {
        let err = Config::parse("[ui]\ndefault_model = \"GPT-9\"\n").unwrap_err();
        assert!(err.to_string().contains("GPT-9"));
    }

    #[test]
    fn test_unknown_default_style_fails_fast() {
        let err = Config::parse("[ui]\ndefault_style = \"Sarcastic\"\n").unwrap_err();
        assert!(err.to_string().contains("Sarcastic"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Config::parse("[ui]\ntheme = \"solarized\"\n").is_err());
    }

    #[test]
    fn test_saved_config_parses_back() {
        let mut config = Config::default();
        config.ui.theme = ThemeVariant::Dark;
        config.bedrock.region = Some("us-west-2".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.ui.theme, ThemeVariant::Dark);
        assert_eq!(parsed.bedrock.region.as_deref(), Some("us-west-2"));
        assert!(!text.contains("endpoint"));
    }
}
