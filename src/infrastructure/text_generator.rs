use crate::infrastructure::error::InfraError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// The generative text collaborator. May return empty or arbitrarily
/// malformed text; an empty string is a valid, non-erroneous response.
/// Only transport faults are errors.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InfraError>;
}

/// Talks to a local Ollama-style inference server over HTTP
/// (`POST {base}/api/generate`, non-streaming).
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: Client,
    base_url: Url,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl HttpTextGenerator {
    pub fn new(base_url: &str, model: &str) -> Result<Self, InfraError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| InfraError::InvalidConfig(format!("invalid generator base url: {error}")))?;
        let model = model.trim();
        if model.is_empty() {
            return Err(InfraError::InvalidConfig(
                "generator model must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            model: model.to_string(),
        })
    }

    fn generate_endpoint(&self) -> Result<Url, InfraError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                InfraError::InvalidConfig("generator base URL cannot be a base".to_string())
            })?;
            segments.pop_if_empty();
            segments.push("api");
            segments.push("generate");
        }
        Ok(url)
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, InfraError> {
        let endpoint = self.generate_endpoint()?;
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                InfraError::Generator(format!("network error while generating text: {error}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            InfraError::Generator(format!("failed reading generation response: {error}"))
        })?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                format!("generation api error: http {}", status.as_u16())
            } else {
                format!("generation api error: http {}; body={body}", status.as_u16())
            };
            return Err(InfraError::Generator(message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|error| {
            InfraError::Generator(format!("invalid generation payload: {error}; body={body}"))
        })?;

        Ok(parsed.response.unwrap_or_default())
    }
}
