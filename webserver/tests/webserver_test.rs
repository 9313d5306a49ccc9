//! Boundary tests for the horoscope HTTP API
//!
//! The full router runs against mocked services, so the tests pin down the
//! public contract: status codes, the `{"detail": ...}` error shape, and
//! the PDF download headers.

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use pipeline::{
    Generation, GenerationFailure, GenerationResult, MockTextGenerator, Pipeline, RetryPolicy,
    TextGenerator,
};
use shared::{HoroscopeVariant, PipelineState};
use webserver::services::HandlebarsRenderer;
use webserver::traits::{
    MockDocumentStore, MockPdfRenderer, MockTemplateRenderer, TemplateRenderer,
};
use webserver::types::AccessCode;
use webserver::{WebServer, WebServerError};

fn build_router<G, T>(generator: G, renderer: T, pdf: MockPdfRenderer, store: MockDocumentStore) -> Router
where
    G: TextGenerator + 'static,
    T: TemplateRenderer + 'static,
{
    let webserver = WebServer::new(
        "127.0.0.1:0".parse().unwrap(),
        PathBuf::from("static"),
        Pipeline::new(generator, RetryPolicy::default()),
        renderer,
        pdf,
        store,
    );
    webserver.build_router()
}

async fn post_horoscope(router: Router, payload: Value) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/horoscope/horoscope-pdf")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let disposition = response
        .headers()
        .get("content-disposition")
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body, disposition)
}

async fn get_path(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

fn detail(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).unwrap();
    value["detail"].as_str().unwrap_or_default().to_string()
}

fn valid_code_store() -> MockDocumentStore {
    let mut store = MockDocumentStore::new();
    store
        .expect_consume_access_code()
        .withf(|code| code == "tajny-kod")
        .returning(|code| {
            Ok(Some(AccessCode {
                code: code.to_string(),
                last_used: None,
            }))
        });
    store
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = build_router(
        MockTextGenerator::new(),
        MockTemplateRenderer::new(),
        MockPdfRenderer::new(),
        MockDocumentStore::new(),
    );

    let response = router
        .oneshot(
            Request::builder()
                .uri("/status/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_readiness_reflects_storage_state() {
    for (available, expected_status) in [
        (true, StatusCode::OK),
        (false, StatusCode::SERVICE_UNAVAILABLE),
    ] {
        let mut store = MockDocumentStore::new();
        store.expect_check_connection().return_const(available);

        let router = build_router(
            MockTextGenerator::new(),
            MockTemplateRenderer::new(),
            MockPdfRenderer::new(),
            store,
        );

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/status/readiness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), expected_status);
        if !available {
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(detail(&body), "Connection to storage failed");
        }
    }
}

#[tokio::test]
async fn test_front_end_assets_are_served() {
    let router = build_router(
        MockTextGenerator::new(),
        MockTemplateRenderer::new(),
        MockPdfRenderer::new(),
        MockDocumentStore::new(),
    );

    let (status, body) = get_path(router.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("horoscope-form"));

    let (status, body) = get_path(router.clone(), "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    let script = String::from_utf8(body).unwrap();
    assert!(script.contains("/api/horoscope/horoscope-pdf"));

    let (status, _) = get_path(router, "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_requests_stay_inside_the_assets_directory() {
    let router = build_router(
        MockTextGenerator::new(),
        MockTemplateRenderer::new(),
        MockPdfRenderer::new(),
        MockDocumentStore::new(),
    );

    let (status, _) = get_path(router, "/static/../Cargo.toml").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_access_code_is_rejected_before_generation() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().times(0);

    let mut store = MockDocumentStore::new();
    store
        .expect_consume_access_code()
        .returning(|_| Ok(None));

    let router = build_router(
        generator,
        MockTemplateRenderer::new(),
        MockPdfRenderer::new(),
        store,
    );

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "spatny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body), "Nevalidní přístupový kód.");
}

#[tokio::test]
async fn test_invalid_input_is_rejected_without_generation() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().times(0);

    let mut renderer = MockTemplateRenderer::new();
    renderer.expect_render().times(0);

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf().times(0);

    let router = build_router(generator, renderer, pdf, valid_code_store());

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "   ",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body), "Neplatné jméno. Jméno nesmí být prázdné.");
}

#[tokio::test]
async fn test_happy_path_returns_pdf_download() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().times(4).returning(|_| {
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 10,
            output_tokens: 20,
        })
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .withf(|template, data| {
            template == "basic_template"
                && data["zodiac_cz"] == "Kozoroh"
                && data["astro_number"] == 8
                && data["sections"].as_array().map(Vec::len) == Some(4)
        })
        .returning(|_, _| Ok("<html>horoskop</html>".to_string()));

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf()
        .withf(|html| html == "<html>horoskop</html>")
        .returning(|_| Ok(b"%PDF-1.4 fake".to_vec()));

    let mut store = valid_code_store();
    store
        .expect_store_pdf()
        .withf(|filename, content| {
            filename.starts_with("Jana_Nováková_")
                && filename.ends_with("_horoskop.pdf")
                && content.starts_with(b"%PDF")
        })
        .returning(|filename, _| Ok(format!("horoscopes_pdf/{filename}")));
    store
        .expect_store_document()
        .withf(|document| {
            document.state.error.is_none()
                && document.state.sections.len() == 4
                && document.state.total_input_tokens == 40
                && document.state.total_output_tokens == 80
                && document.access_code.as_deref() == Some("tajny-kod")
                && document.file_id.is_some()
                && document.processing_time.is_some()
        })
        .returning(|_| Ok("document-id".to_string()));

    let router = build_router(generator, renderer, pdf, store);

    let (status, body, disposition) = post_horoscope(
        router,
        json!({
            "name": "Jana Nováková",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"%PDF-1.4 fake".to_vec());

    let disposition = disposition.expect("PDF response carries Content-Disposition");
    assert!(disposition.starts_with("attachment; filename*=UTF-8''Jana_Nov%C3%A1kov%C3%A1_"));
    assert!(disposition.ends_with("_horoskop.pdf"));
}

// Finishes later catalog sections first, so the fan-out hands the boundary
// sections in reversed order.
struct StaggeredGenerator;

#[async_trait::async_trait]
impl TextGenerator for StaggeredGenerator {
    async fn generate(&self, user_prompt: &str) -> GenerationResult<Generation> {
        let delay = if user_prompt.contains("neformálním pozdravem") {
            Duration::from_millis(40)
        } else if user_prompt.contains("kladné vlastnosti") {
            Duration::from_millis(30)
        } else if user_prompt.contains("profesnímu životu") {
            Duration::from_millis(20)
        } else {
            Duration::from_millis(10)
        };
        tokio::time::sleep(delay).await;
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_rendered_sections_follow_catalog_order() {
    let renderer = HandlebarsRenderer::new().unwrap();

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf()
        .returning(|html| Ok(html.as_bytes().to_vec()));

    let mut store = valid_code_store();
    store
        .expect_store_pdf()
        .returning(|_, _| Ok("horoscopes_pdf/x.pdf".to_string()));
    store
        .expect_store_document()
        .returning(|_| Ok("document-id".to_string()));

    let router = build_router(StaggeredGenerator, renderer, pdf, store);

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    // the PDF mock echoes the rendered HTML, so the body shows section order
    let html = String::from_utf8(body).unwrap();
    let positions: Vec<usize> = [
        "Definice znamení",
        "Silné a slabé stránky",
        "Práce a kariéra",
        "Vztahy a partnerství",
    ]
    .iter()
    .map(|title| {
        html.find(title)
            .unwrap_or_else(|| panic!("section '{title}' missing from document"))
    })
    .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "sections out of catalog order at byte offsets {positions:?}"
    );
}

#[tokio::test]
async fn test_path_like_name_cannot_escape_the_pdf_directory() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().returning(|_| {
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        })
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .returning(|_, _| Ok("<html></html>".to_string()));

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf().returning(|_| Ok(b"%PDF".to_vec()));

    let mut store = valid_code_store();
    store
        .expect_store_pdf()
        .withf(|filename, _| {
            filename.starts_with(".._.._escaped_")
                && !filename.contains('/')
                && !filename.contains('\\')
        })
        .returning(|filename, _| Ok(format!("horoscopes_pdf/{filename}")));
    store
        .expect_store_document()
        .returning(|_| Ok("document-id".to_string()));

    let router = build_router(generator, renderer, pdf, store);

    let (status, _, disposition) = post_horoscope(
        router,
        json!({
            "name": "../../escaped",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let disposition = disposition.expect("PDF response carries Content-Disposition");
    assert!(disposition.contains(".._.._escaped_"));
}

#[tokio::test]
async fn test_defaults_to_basic_variant_when_type_missing() {
    let mut generator = MockTextGenerator::new();
    // the basic variant fans out four sections
    generator.expect_generate().times(4).returning(|_| {
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        })
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .returning(|_, _| Ok("<html></html>".to_string()));

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf().returning(|_| Ok(b"%PDF".to_vec()));

    let mut store = valid_code_store();
    store
        .expect_store_pdf()
        .returning(|_, _| Ok("horoscopes_pdf/x.pdf".to_string()));
    store
        .expect_store_document()
        .withf(|document| document.state.variant == HoroscopeVariant::Basic)
        .returning(|_| Ok("document-id".to_string()));

    let router = build_router(generator, renderer, pdf, store);

    let (status, _, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "tajny-kod"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_partial_generation_failure_maps_to_bad_request() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().times(4).returning(|prompt| {
        // the career instruction is the only one mentioning professional life
        if prompt.contains("profesnímu životu") {
            Err(GenerationFailure::Failed { status: 400 })
        } else {
            Ok(Generation {
                text: "<p>Sekce</p>".to_string(),
                input_tokens: 10,
                output_tokens: 20,
            })
        }
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer.expect_render().times(0);

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf().times(0);

    let router = build_router(generator, renderer, pdf, valid_code_store());

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        detail(&body),
        "Error in generating response for key career: request failed (HTTP 400)"
    );
}

#[tokio::test]
async fn test_pdf_conversion_failure_maps_to_internal_error() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().returning(|_| {
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        })
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .returning(|_, _| Ok("<html></html>".to_string()));

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf()
        .returning(|_| Err(WebServerError::PdfGeneration { status: 503 }));

    let mut store = valid_code_store();
    store.expect_store_pdf().times(0);
    store.expect_store_document().times(0);

    let router = build_router(generator, renderer, pdf, store);

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(detail(&body), "PDF generation failed - 503");
}

#[tokio::test]
async fn test_storage_failure_returns_fixed_apology() {
    let mut generator = MockTextGenerator::new();
    generator.expect_generate().returning(|_| {
        Ok(Generation {
            text: "<p>Sekce</p>".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        })
    });

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .returning(|_, _| Ok("<html></html>".to_string()));

    let mut pdf = MockPdfRenderer::new();
    pdf.expect_render_pdf().returning(|_| Ok(b"%PDF".to_vec()));

    let mut store = valid_code_store();
    store.expect_store_pdf().returning(|_, _| {
        Err(WebServerError::IoError(std::io::Error::other(
            "disk failure",
        )))
    });
    store.expect_store_document().times(0);

    let router = build_router(generator, renderer, pdf, store);

    let (status, body, _) = post_horoscope(
        router,
        json!({
            "name": "Jana",
            "dob": "31.12.1999",
            "code": "tajny-kod",
            "horoscope_type": "HoroscopeBasic"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        detail(&body),
        "Hvězdy momentálně nepřejí. Zkuste to prosím později."
    );
}

#[test]
fn test_pipeline_state_wire_format_matches_template_expectations() {
    let state = PipelineState::new("Jana", "31.12.1999", HoroscopeVariant::Basic);
    let value = serde_json::to_value(&state).unwrap();

    // fields the template and the stored document rely on
    assert!(value.get("name").is_some());
    assert!(value.get("dob").is_some());
    assert!(value.get("sections").is_some());
    // unset enrichment fields are excluded, not null
    assert!(value.get("zodiac").is_none());
    assert!(value.get("error").is_none());
}
