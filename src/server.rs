//! HTTP surface.
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `GET /` | — | welcome JSON |
//! | `POST /generate/` | `QuizRequest` JSON | `{"quiz": [...]}` |
//! | `POST /download/` | `QuizRequest` JSON | `.docx` attachment |
//! | `POST /upload-pdf/` | multipart, field `file` | `.docx` attachment |
//!
//! Every failure is reported as `{"detail": "..."}` with the status from
//! [`QuizError::status_code`]. Input is validated before any completion call.

use crate::config::ServerConfig;
use crate::error::QuizError;
use crate::generate::QuizGenerator;
use crate::model::{ErrorResponse, Quiz, QuizRequest, QuizResponse, WelcomeResponse};
use crate::pipeline::extract::extract_text;
use crate::pipeline::render::{quiz_filename, render_docx, DOCX_MIME_TYPE};
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Payload of `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Quiz Generation API!";

/// Multipart field carrying the PDF.
const UPLOAD_FIELD: &str = "file";

/// Shared, read-only state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<QuizGenerator>,
}

impl AppState {
    pub fn new(generator: QuizGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// A [`QuizError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub QuizError);

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            warn!("Request failed ({}): {}", status, self.0);
        } else {
            info!("Request rejected ({}): {}", status, self.0);
        }
        let body = ErrorResponse {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/generate/", post(generate))
        .route("/download/", post(download))
        .route("/upload-pdf/", post(upload_pdf))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let request = parse_request(payload)?;
    let num_questions = request.validate()?;
    let quiz = state
        .generator
        .generate_quiz(&request.text, num_questions)
        .await?;
    Ok(Json(QuizResponse { quiz }))
}

async fn download(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = parse_request(payload)?;
    let num_questions = request.validate()?;
    let quiz = state
        .generator
        .generate_quiz(&request.text, num_questions)
        .await?;
    docx_response(&quiz)
}

async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| QuizError::Validation(rejection.body_text()))?;
    let mut pdf: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| QuizError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| QuizError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(bytes.to_vec());
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| {
        QuizError::Validation(format!("Missing '{UPLOAD_FIELD}' field in upload"))
    })?;
    info!("Received PDF upload: {} bytes", pdf.len());

    let text = extract_text(pdf).await?;
    let num_questions = state.generator.config().upload_num_questions;
    let quiz = state.generator.generate_quiz(&text, num_questions).await?;
    docx_response(&quiz)
}

fn parse_request(payload: Result<Json<QuizRequest>, JsonRejection>) -> Result<QuizRequest, QuizError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| QuizError::Validation(rejection.body_text()))
}

fn docx_response(quiz: &Quiz) -> Result<Response, ApiError> {
    let bytes = render_docx(quiz)?;
    let filename = quiz_filename(&chrono::Local::now());
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
