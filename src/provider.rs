// src/provider.rs

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;

use super::config::Config;
use super::error::ServiceError;

/// What a model run produced: raw bytes from image models, a JSON object from
/// chat models.
#[derive(Debug)]
pub enum ModelOutput {
    Binary(Vec<u8>),
    Json(Value),
}

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn run(&self, model: &str, input: Value) -> Result<ModelOutput, ServiceError>;
}

/// Calls the Cloudflare Workers AI REST API.
pub struct WorkersAiProvider {
    client: reqwest::Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl WorkersAiProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn run_url(&self, model: &str) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.base_url, self.account_id, model)
    }
}

#[async_trait]
impl InferenceProvider for WorkersAiProvider {
    async fn run(&self, model: &str, input: Value) -> Result<ModelOutput, ServiceError> {
        let url = self.run_url(model);
        log::debug!("running {model} via {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&input)
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        let body = response.bytes().await?;

        if is_json {
            return unwrap_envelope(status.as_u16(), &body).map(ModelOutput::Json);
        }
        if !status.is_success() {
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(ModelOutput::Binary(body.to_vec()))
    }
}

#[derive(Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Extracts `result` from a `{success, result, errors}` API envelope.
fn unwrap_envelope(status: u16, body: &[u8]) -> Result<Value, ServiceError> {
    let envelope: ApiEnvelope = serde_json::from_slice(body).map_err(|_| ServiceError::Upstream {
        status,
        message: String::from_utf8_lossy(body).into_owned(),
    })?;

    if envelope.success && (200..300).contains(&status) {
        return envelope
            .result
            .ok_or(ServiceError::UnexpectedOutput("response envelope has no result"));
    }

    let message = if envelope.errors.is_empty() {
        "request was not successful".to_string()
    } else {
        envelope
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} ({code})", e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    };
    Err(ServiceError::Upstream { status, message })
}
