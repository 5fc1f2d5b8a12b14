// src/error.rs
use docsmith_templates::TemplateError;
use thiserror::Error;

/// A comprehensive error type for the whole publish pipeline.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Template failed: {0}")]
    Template(#[from] TemplateError),

    #[error("Tutorial loading failed: {0}")]
    Tutorial(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}
