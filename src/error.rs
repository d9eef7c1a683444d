// src/error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Could not read request body: {0}")]
    Payload(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inference provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Unexpected inference output: {0}")]
    UnexpectedOutput(&'static str),
}

// Everything except an unroutable envelope collapses to a 500.
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UnsupportedType(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
