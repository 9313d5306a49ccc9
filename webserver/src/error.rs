//! WebServer-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("PDF generation failed - {status}")]
    PdfGeneration { status: u16 },

    #[error("PDF service unreachable: {message}")]
    PdfService { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;
