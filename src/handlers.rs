// src/handlers.rs

use super::api::{lang_or_default, Envelope, ENVELOPE_TYPES};
use super::error::ServiceError;
use super::services;
use super::AppState;
use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use serde_json::Value;

/// Single entry point for every path and method. `OPTIONS` is answered
/// directly; anything else is treated as a JSON envelope.
pub async fn dispatch(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, ServiceError> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::NoContent().finish());
    }

    let result = match body {
        Ok(body) => handle_envelope(&state, &body).await,
        Err(e) => Err(ServiceError::Payload(e.to_string())),
    };
    if let Err(e) = &result {
        log::error!("{} {} failed: {e}", req.method(), req.path());
    }
    result
}

async fn handle_envelope(state: &AppState, body: &[u8]) -> Result<HttpResponse, ServiceError> {
    let provider = state.provider.as_ref();

    let envelope = parse_envelope(body)?;
    log::info!("{} request", envelope.kind());

    match envelope {
        Envelope::Image { topic } => {
            let out = services::generate_image(provider, &topic).await?;
            Ok(HttpResponse::Ok().json(out))
        }
        Envelope::Text { topic, mode, lang } => {
            let lang = lang_or_default(lang);
            log::debug!("text lang={lang}, mode={mode:?}");
            let out = services::generate_text(provider, &topic, &lang, mode).await?;
            Ok(HttpResponse::Ok().json(out))
        }
        Envelope::Analyze { content_to_refine, lang } => {
            let lang = lang_or_default(lang);
            let out = services::analyze_content(provider, &content_to_refine, &lang).await?;
            Ok(HttpResponse::Ok().json(out))
        }
    }
}

/// Checks the `type` discriminator before decoding the typed envelope so an
/// unknown operation is reported as such rather than as a decode failure.
/// Bodies that are not JSON objects are decode failures.
fn parse_envelope(body: &[u8]) -> Result<Envelope, ServiceError> {
    let value: Value = serde_json::from_slice(body)?;
    let Some(fields) = value.as_object() else {
        return Ok(serde_json::from_value(value)?);
    };

    match fields.get("type") {
        Some(Value::String(t)) if ENVELOPE_TYPES.contains(&t.as_str()) => {
            Ok(serde_json::from_value(value)?)
        }
        Some(other) => Err(ServiceError::UnsupportedType(other.to_string())),
        None => Err(ServiceError::UnsupportedType("missing".to_string())),
    }
}
