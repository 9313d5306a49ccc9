//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;

use crate::error::WebServerResult;
use crate::types::{AccessCode, HoroscopeDocument};

/// HTML templating service trait
#[mockall::automock]
pub trait TemplateRenderer: Send + Sync {
    /// Render a registered template with the given data
    fn render(&self, template: &str, data: &serde_json::Value) -> WebServerResult<String>;
}

/// HTML to PDF conversion service trait
#[mockall::automock]
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Convert a rendered HTML document into PDF bytes
    async fn render_pdf(&self, html: &str) -> WebServerResult<Vec<u8>>;
}

/// Persistence service trait for access codes, documents and PDF files
#[mockall::automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up an access code and stamp its last use, `None` for unknown codes
    async fn consume_access_code(&self, code: &str) -> WebServerResult<Option<AccessCode>>;

    /// Persist PDF bytes under the given filename, returning the file id
    async fn store_pdf(&self, filename: &str, content: &[u8]) -> WebServerResult<String>;

    /// Persist the generated horoscope record, returning the document id
    async fn store_document(&self, document: &HoroscopeDocument) -> WebServerResult<String>;

    /// Check storage availability for the readiness endpoint
    async fn check_connection(&self) -> bool;
}
