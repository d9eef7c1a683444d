// src/services.rs

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;

use super::api::{ImageResponse, Message, Mode, TextResponse};
use super::error::ServiceError;
use super::prompts;
use super::provider::{InferenceProvider, ModelOutput};

pub async fn generate_image(
    provider: &dyn InferenceProvider,
    topic: &str,
) -> Result<ImageResponse, ServiceError> {
    let prompt = prompts::image_prompt(topic);
    let output = provider
        .run(prompts::IMAGE_MODEL, json!({ "prompt": prompt }))
        .await?;

    match output {
        ModelOutput::Binary(bytes) if !bytes.is_empty() => Ok(ImageResponse {
            image: STANDARD.encode(bytes),
        }),
        ModelOutput::Binary(_) => Err(ServiceError::UnexpectedOutput("image model returned no data")),
        ModelOutput::Json(_) => Err(ServiceError::UnexpectedOutput(
            "image model returned JSON instead of image bytes",
        )),
    }
}

pub async fn generate_text(
    provider: &dyn InferenceProvider,
    topic: &str,
    lang: &str,
    mode: Option<Mode>,
) -> Result<TextResponse, ServiceError> {
    let ctx = prompts::locale_context(lang);
    log::debug!(
        "text locale for {lang}: {} / {} / {}",
        ctx.region, ctx.currency, ctx.culture
    );
    let prompt = prompts::text_prompt(topic, lang, mode);
    chat(
        provider,
        vec![Message::system(prompts::TEXT_SYSTEM), Message::user(prompt)],
    )
    .await
}

pub async fn analyze_content(
    provider: &dyn InferenceProvider,
    content: &str,
    lang: &str,
) -> Result<TextResponse, ServiceError> {
    let prompt = prompts::analyze_prompt(content, lang);
    chat(
        provider,
        vec![Message::system(prompts::ANALYZE_SYSTEM), Message::user(prompt)],
    )
    .await
}

/// Runs the chat model and hands back its `response` field untouched.
async fn chat(
    provider: &dyn InferenceProvider,
    messages: Vec<Message>,
) -> Result<TextResponse, ServiceError> {
    let output = provider
        .run(prompts::TEXT_MODEL, json!({ "messages": messages }))
        .await?;

    match output {
        ModelOutput::Json(mut value) => Ok(TextResponse {
            result: value.get_mut("response").map(serde_json::Value::take),
        }),
        ModelOutput::Binary(_) => Err(ServiceError::UnexpectedOutput(
            "text model returned binary data",
        )),
    }
}
