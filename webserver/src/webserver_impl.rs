//! Main webserver implementation
//!
//! This module contains the main WebServer struct that wires the generation
//! pipeline and the boundary services together using dependency injection.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};

use pipeline::{Pipeline, TextGenerator};
use shared::{PipelineState, czech_name, sections_for};

use crate::error::{WebServerError, WebServerResult};
use crate::services::templates::BASIC_TEMPLATE;
use crate::traits::{DocumentStore, PdfRenderer, TemplateRenderer};
use crate::types::{HoroscopeDocument, UserInput};

/// Fixed apology returned when the flow fails for reasons the caller
/// cannot influence.
const INTERNAL_ERROR_MSG: &str = "Hvězdy momentálně nepřejí. Zkuste to prosím později.";

/// Main webserver struct with dependency injection
pub struct WebServer<G, T, P, S>
where
    G: TextGenerator,
    T: TemplateRenderer,
    P: PdfRenderer,
    S: DocumentStore,
{
    pipeline: Arc<Pipeline<G>>,
    template_renderer: Arc<T>,
    pdf_renderer: Arc<P>,
    store: Arc<S>,
    bind_address: SocketAddr,
    static_dir: PathBuf,
}

// services sit behind Arc, so cloning must not demand Clone of the generics
impl<G, T, P, S> Clone for WebServer<G, T, P, S>
where
    G: TextGenerator,
    T: TemplateRenderer,
    P: PdfRenderer,
    S: DocumentStore,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            template_renderer: Arc::clone(&self.template_renderer),
            pdf_renderer: Arc::clone(&self.pdf_renderer),
            store: Arc::clone(&self.store),
            bind_address: self.bind_address,
            static_dir: self.static_dir.clone(),
        }
    }
}

impl<G, T, P, S> WebServer<G, T, P, S>
where
    G: TextGenerator + 'static,
    T: TemplateRenderer + 'static,
    P: PdfRenderer + 'static,
    S: DocumentStore + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(
        bind_address: SocketAddr,
        static_dir: PathBuf,
        pipeline: Pipeline<G>,
        template_renderer: T,
        pdf_renderer: P,
        store: S,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            template_renderer: Arc::new(template_renderer),
            pdf_renderer: Arc::new(pdf_renderer),
            store: Arc::new(store),
            bind_address,
            static_dir,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Static front-end
            .route_service("/", ServeFile::new(self.static_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(&self.static_dir))
            // API routes
            .route("/api/horoscope/horoscope-pdf", post(generate_horoscope_pdf))
            // Health checks
            .route("/status/health", get(health_check))
            .route("/status/readiness", get(readiness_check))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.clone())
    }

    /// Start the webserver
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!(
                    "Failed to bind to {}: {}",
                    self.bind_address, e
                ))
            })?;

        info!("🌐 Horoscope server listening on http://{}", self.bind_address);

        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Server error: {}", e);
            }
        });

        // Wait for the server to finish or for a shutdown signal
        tokio::select! {
            _ = server_task => {
                info!("HTTP server task completed");
            },
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Received shutdown signal");
            }
        }

        Ok(())
    }
}

/// JSON error response in the `{"detail": ...}` shape of the public API
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MSG)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

fn pdf_filename(name: &str, timestamp: DateTime<Utc>) -> String {
    // spaces for readability, path characters so the stored name cannot
    // leave the PDF directory
    let safe_name: String = name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            _ => c,
        })
        .collect();
    format!(
        "{}_{}_horoskop.pdf",
        safe_name,
        timestamp.format("%Y-%m-%d_%H:%M:%S")
    )
}

/// The fan-out returns sections in completion order; the document always
/// reads in catalog order.
fn sort_sections_for_display(state: &mut PipelineState) {
    let catalog = sections_for(state.variant);
    state.sections.sort_by_key(|section| {
        catalog
            .iter()
            .position(|prompt| section.key == prompt.key)
            .unwrap_or(usize::MAX)
    });
}

// HTTP Handlers

/// Generate a horoscope document and hand it back as a PDF download
async fn generate_horoscope_pdf<G, T, P, S>(
    State(webserver): State<WebServer<G, T, P, S>>,
    Json(user_input): Json<UserInput>,
) -> Result<Response, ApiError>
where
    G: TextGenerator + 'static,
    T: TemplateRenderer + 'static,
    P: PdfRenderer + 'static,
    S: DocumentStore + 'static,
{
    let started_at = Utc::now();
    let started = Instant::now();

    info!(
        "📥 Horoscope request for '{}' ({:?})",
        user_input.name, user_input.horoscope_type
    );

    // access codes are consumed up front, before any generation work
    let access_code = webserver
        .store
        .consume_access_code(&user_input.code)
        .await
        .map_err(|e| {
            error!("Access code lookup failed: {}", e);
            ApiError::internal()
        })?
        .ok_or_else(|| ApiError::bad_request("Nevalidní přístupový kód."))?;

    let mut state = webserver
        .pipeline
        .run(&user_input.name, &user_input.dob, user_input.horoscope_type)
        .await;

    info!("LLM processing time: {:.2?}", started.elapsed());

    if let Some(message) = &state.error {
        return Err(ApiError::bad_request(message.clone()));
    }

    sort_sections_for_display(&mut state);

    let pdf_started = Instant::now();

    let mut template_data = serde_json::to_value(&state).map_err(|e| {
        error!("Error during horoscope generation: {}", e);
        ApiError::internal()
    })?;
    template_data["zodiac_cz"] = json!(state.zodiac.map(czech_name).unwrap_or("Unknown"));

    let html = webserver
        .template_renderer
        .render(BASIC_TEMPLATE, &template_data)
        .map_err(|e| {
            error!("Error during horoscope generation: {}", e);
            ApiError::internal()
        })?;

    let pdf = webserver.pdf_renderer.render_pdf(&html).await.map_err(|e| {
        error!("PDF rendering failed: {}", e);
        match e {
            WebServerError::PdfGeneration { .. } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            _ => ApiError::internal(),
        }
    })?;
    let pdf_elapsed = pdf_started.elapsed();

    let filename = pdf_filename(&user_input.name, started_at);

    let file_id = webserver
        .store
        .store_pdf(&filename, &pdf)
        .await
        .map_err(|e| {
            error!("Failed to store PDF: {}", e);
            ApiError::internal()
        })?;

    let document = HoroscopeDocument {
        state,
        created_at: started_at,
        processing_time: Some(started.elapsed().as_secs_f64()),
        access_code: Some(access_code.code),
        file_id: Some(file_id),
    };
    webserver.store.store_document(&document).await.map_err(|e| {
        error!("Failed to store horoscope document: {}", e);
        ApiError::internal()
    })?;

    info!("PDF processing time: {:.2?}", pdf_elapsed);
    info!("✅ Horoscope PDF ready: {}", filename);

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename*=UTF-8''{}",
                urlencoding::encode(&filename)
            ),
        ),
    ];
    Ok((headers, pdf).into_response())
}

/// Check that the server is running
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Check that the server can reach its storage
async fn readiness_check<G, T, P, S>(
    State(webserver): State<WebServer<G, T, P, S>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    G: TextGenerator + 'static,
    T: TemplateRenderer + 'static,
    P: PdfRenderer + 'static,
    S: DocumentStore + 'static,
{
    if webserver.store.check_connection().await {
        Ok(Json(json!({ "status": "ok" })))
    } else {
        Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Connection to storage failed",
        ))
    }
}
