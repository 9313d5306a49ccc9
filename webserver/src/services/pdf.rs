//! Gotenberg HTML to PDF conversion client
//!
//! Ships the rendered document to a Gotenberg instance as a multipart
//! upload and returns the converted PDF bytes.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::PdfRenderer;

pub struct GotenbergClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: String,
}

impl GotenbergClient {
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait::async_trait]
impl PdfRenderer for GotenbergClient {
    async fn render_pdf(&self, html: &str) -> WebServerResult<Vec<u8>> {
        // Gotenberg's chromium route expects the page as a file named index.html
        let page = Part::text(html.to_string())
            .file_name("index.html")
            .mime_str("text/html")
            .map_err(|e| WebServerError::PdfService {
                message: e.to_string(),
            })?;
        let form = Form::new().part("files", page);

        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.username, Some(&self.password))
            .multipart(form)
            .send()
            .await
            .map_err(|e| WebServerError::PdfService {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WebServerError::PdfGeneration {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WebServerError::PdfService {
                message: e.to_string(),
            })?;
        debug!("Received PDF ({} bytes)", bytes.len());

        Ok(bytes.to_vec())
    }
}
