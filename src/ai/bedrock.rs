//! Amazon Bedrock client for Titan text completion

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use super::catalog::Provider;
use super::error::{GenerationError, GenerationResult};
use super::sigv4::{self, AwsCredentials, SignableRequest, SigningParams};

const SERVICE: &str = "bedrock";

// Fixed generation config
const MAX_TOKEN_COUNT: u32 = 512;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;

/// Bedrock runtime client. Requests are SigV4-signed with static credentials.
#[derive(Clone)]
pub struct BedrockClient {
    client: Client,
    credentials: Option<AwsCredentials>,
    region: String,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeRequest<'a> {
    input_text: &'a str,
    text_generation_config: TextGenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextGenerationConfig {
    max_token_count: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Deserialize)]
struct InvokeResponse {
    results: Vec<InvokeResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokeResult {
    output_text: String,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl BedrockClient {
    /// Create a client for `region`. `endpoint` overrides the regional
    /// runtime endpoint.
    pub fn new(
        credentials: Option<AwsCredentials>,
        region: String,
        endpoint: Option<String>,
    ) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| Self::regional_endpoint(&region));
        Self {
            client: Client::new(),
            credentials,
            region,
            endpoint,
        }
    }

    pub fn regional_endpoint(region: &str) -> String {
        format!("https://bedrock-runtime.{}.amazonaws.com", region)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn invoke(&self, prompt: &str, model_id: &str) -> GenerationResult {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(GenerationError::MissingCredentials(Provider::Bedrock))?;

        let body = serde_json::to_vec(&InvokeRequest {
            input_text: prompt,
            text_generation_config: TextGenerationConfig {
                max_token_count: MAX_TOKEN_COUNT,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        })
        .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let url = Url::parse(&format!(
            "{}/model/{}/invoke",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(model_id)
        ))
        .map_err(|e| GenerationError::Transport(format!("invalid Bedrock endpoint: {}", e)))?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(GenerationError::Transport(format!(
                    "invalid Bedrock endpoint: {} has no host",
                    self.endpoint
                )));
            }
        };

        let headers = [
            ("accept", "application/json"),
            ("content-type", "application/json"),
            ("host", host.as_str()),
        ];
        let auth_headers = sigv4::sign(
            &SignableRequest {
                method: "POST",
                path: url.path(),
                headers: &headers,
                payload: &body,
            },
            &SigningParams {
                credentials,
                region: &self.region,
                service: SERVICE,
                time: Utc::now(),
            },
        );

        tracing::debug!(model_id, region = %self.region, "invoking Bedrock model");

        let mut request = self.client.post(url.clone());
        for (name, value) in headers.iter() {
            request = request.header(*name, *value);
        }
        for (name, value) in &auth_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Bedrock request failed");
            return Err(GenerationError::ServiceError {
                status: status.as_u16(),
                message: service_message(status, &text),
            });
        }

        let parsed: InvokeResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::Parse(format!("failed to parse Bedrock response: {}", e))
        })?;

        let first = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Parse("Bedrock returned no results".to_string()))?;

        Ok(clean_output(&first.output_text))
    }
}

impl TextGenerator for BedrockClient {
    async fn generate(&self, prompt: &str, model_id: &str) -> GenerationResult {
        self.invoke(prompt, model_id).await
    }
}

/// Titan tends to echo a lead-in line, so everything up to and including the
/// first newline is dropped before trimming.
pub fn clean_output(text: &str) -> String {
    let rest = match text.find('\n') {
        Some(idx) => &text[idx + 1..],
        None => text,
    };
    rest.trim().to_string()
}

fn service_message(status: StatusCode, body: &str) -> String {
    if let Ok(ServiceErrorBody { message: Some(m) }) = serde_json::from_str(body)
        && !m.trim().is_empty()
    {
        return m;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown service error")
        .to_string()
}
