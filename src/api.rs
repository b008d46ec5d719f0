//! HTTP surface for Rusty Summary.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /summarize` – Summarize pasted text sent as `{ "text": "..." }`.
//! - `POST /summarize/upload` – Summarize a multipart form with an optional `input_text` field
//!   and an optional `file` field holding a PDF. Exactly one of the two must be filled in.
//! - `GET /health` – Liveness probe naming the model in use.
//! - `GET /metrics` – Summarization counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools/hosts.
//!
//! Errors are returned as `{ "error": "...", "category": "validation" | "extraction" |
//! "summarization" }` so clients can redisplay the form with the specific message.

use crate::metrics::MetricsSnapshot;
use crate::service::{
    DocumentKind, ErrorCategory, ServiceError, SummaryApi, SummaryInput, SummaryReport,
    UploadedFile,
};
use crate::summarizer::SummaryPath;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the summarization API surface.
///
/// `max_body_bytes` bounds request bodies, uploads included.
pub fn create_router<S>(service: Arc<S>, max_body_bytes: usize) -> Router
where
    S: SummaryApi + 'static,
{
    Router::new()
        .route("/summarize", post(summarize_text::<S>))
        .route("/summarize/upload", post(summarize_upload::<S>))
        .route("/health", get(health::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}

/// Request body for the `POST /summarize` endpoint.
#[derive(Deserialize)]
struct SummarizeRequest {
    /// Pasted document text.
    #[serde(default)]
    text: String,
}

/// Success response shared by both summarize endpoints.
#[derive(Serialize)]
struct SummarizeResponse {
    request_id: String,
    summary: String,
    source: DocumentKind,
    path: SummaryPath,
    input_words: usize,
    chunk_count: usize,
    model_calls: usize,
    recombined: bool,
    generated_at: String,
}

impl From<SummaryReport> for SummarizeResponse {
    fn from(report: SummaryReport) -> Self {
        let SummaryReport {
            request_id,
            source,
            outcome,
            generated_at,
        } = report;
        Self {
            request_id,
            summary: outcome.summary,
            source,
            path: outcome.path,
            input_words: outcome.input_words,
            chunk_count: outcome.chunk_count,
            model_calls: outcome.model_calls,
            recombined: outcome.recombined,
            generated_at,
        }
    }
}

/// Summarize pasted text.
async fn summarize_text<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: SummaryApi,
{
    let report = service
        .summarize(SummaryInput::from_text(request.text))
        .await?;
    tracing::info!(
        request_id = %report.request_id,
        chunks = report.outcome.chunk_count,
        "Summarize request completed"
    );
    Ok(Json(report.into()))
}

/// Summarize a form submission carrying pasted text or a PDF upload.
async fn summarize_upload<S>(
    State(service): State<Arc<S>>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: SummaryApi,
{
    let mut input = SummaryInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("input_text") => {
                input.text = Some(field.text().await?);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                input.file = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    let report = service.summarize(input).await?;
    tracing::info!(
        request_id = %report.request_id,
        source = ?report.source,
        chunks = report.outcome.chunk_count,
        "Upload request completed"
    );
    Ok(Json(report.into()))
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
}

/// Report liveness together with the model identifier.
async fn health<S>(State(service): State<Arc<S>>) -> Json<HealthResponse>
where
    S: SummaryApi,
{
    Json(HealthResponse {
        status: "ok",
        model: service.model_name(),
    })
}

/// Return the current summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: SummaryApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Summarize pasted text. Long documents are chunked by sentence, summarized per chunk, and recombined.",
                request_example: Some(json!({ "text": "Document contents" })),
            },
            CommandDescriptor {
                name: "summarize_upload",
                method: "POST",
                path: "/summarize/upload",
                description: "Summarize a multipart form with either an `input_text` field or a PDF in the `file` field.",
                request_example: None,
            },
            CommandDescriptor {
                name: "health",
                method: "GET",
                path: "/health",
                description: "Report liveness and the summarization model in use.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return summarization counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

enum AppError {
    Service(ServiceError),
    Form(MultipartError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::InputMissing | ServiceError::InputConflict) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::UnsupportedFile(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Service(ServiceError::Extraction(crate::extract::ExtractError::Empty)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(ServiceError::Summarization(_)) => StatusCode::BAD_GATEWAY,
            Self::Form(error) => error.status(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Service(error) => error.category(),
            Self::Form(_) => ErrorCategory::Validation,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = self.category();
        let message = match self {
            Self::Service(error) => error.to_string(),
            Self::Form(error) => format!("Invalid form submission: {}", error.body_text()),
        };
        (
            status,
            Json(json!({ "error": message, "category": category })),
        )
            .into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(inner: ServiceError) -> Self {
        Self::Service(inner)
    }
}

impl From<MultipartError> for AppError {
    fn from(inner: MultipartError) -> Self {
        Self::Form(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::metrics::MetricsSnapshot;
    use crate::service::{ServiceError, SummaryApi, SummaryInput, SummaryReport};
    use crate::summarizer::{SummaryOutcome, SummaryPath};
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "rusty-sum-boundary";

    #[tokio::test]
    async fn commands_catalog_exposes_summarize_endpoint() {
        let response = get_commands().await;
        let commands = response.0.commands;
        let summarize = commands
            .iter()
            .find(|cmd| cmd.name == "summarize")
            .expect("summarize command present");

        assert_eq!(summarize.method, "POST");
        assert_eq!(summarize.path, "/summarize");
        assert!(summarize.description.to_lowercase().contains("chunk"));
        assert!(commands.len() >= 3);
    }

    #[tokio::test]
    async fn summarize_route_returns_outcome() {
        let service = Arc::new(StubSummaryService::default());
        let app = router(service.clone());

        let response = app
            .oneshot(json_request("/summarize", json!({ "text": "Document body" })))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["summary"], "stub summary");
        assert_eq!(json["path"], "single_shot");
        assert_eq!(json["source"], "text");
        assert_eq!(json["model_calls"], 1);

        let calls = service.recorded_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text.as_deref(), Some("Document body"));
    }

    #[tokio::test]
    async fn empty_text_is_a_validation_error() {
        let service = Arc::new(StubSummaryService::default());
        let response = router(service)
            .oneshot(json_request("/summarize", json!({ "text": "  " })))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["category"], "validation");
        assert_eq!(json["error"], "Please either paste some text or upload a PDF.");
    }

    #[tokio::test]
    async fn upload_route_forwards_pdf_file() {
        let service = Arc::new(StubSummaryService::default());
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"input_text\"\r\n\r\n\r\n\
             --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"paper.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n%PDF-1.7\r\n--{BOUNDARY}--\r\n"
        );

        let response = router(service.clone())
            .oneshot(multipart_request(body))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["source"], "pdf");

        let calls = service.recorded_calls().await;
        let file = calls[0].file.as_ref().expect("file forwarded");
        assert_eq!(file.file_name, "paper.pdf");
        assert_eq!(file.bytes, b"%PDF-1.7");
        assert_eq!(calls[0].text.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn upload_route_rejects_non_pdf() {
        let service = Arc::new(StubSummaryService::default());
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.docx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nbinary\r\n--{BOUNDARY}--\r\n"
        );

        let response = router(service)
            .oneshot(multipart_request(body))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["category"], "validation");
    }

    #[tokio::test]
    async fn health_reports_model_name() {
        let service = Arc::new(StubSummaryService::default());
        let response = router(service)
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "stub");
    }

    fn router(service: Arc<StubSummaryService>) -> Router {
        create_router(service, 1024 * 1024)
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    fn multipart_request(body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/summarize/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    #[derive(Default)]
    struct StubSummaryService {
        calls: Mutex<Vec<SummaryInput>>,
    }

    impl StubSummaryService {
        async fn recorded_calls(&self) -> Vec<SummaryInput> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl SummaryApi for StubSummaryService {
        async fn summarize(&self, input: SummaryInput) -> Result<SummaryReport, ServiceError> {
            self.calls.lock().await.push(input.clone());
            let source = input.into_source()?;
            Ok(SummaryReport {
                request_id: "req-1".into(),
                source: source.kind(),
                outcome: SummaryOutcome {
                    summary: "stub summary".into(),
                    path: SummaryPath::SingleShot,
                    input_words: 2,
                    chunk_count: 1,
                    model_calls: 1,
                    recombined: false,
                },
                generated_at: "2025-01-01T00:00:00Z".into(),
            })
        }

        fn model_name(&self) -> String {
            "stub".into()
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                documents_summarized: 0,
                chunks_summarized: 0,
                model_calls: 0,
                recombination_passes: 0,
                failures: 0,
            }
        }
    }
}
