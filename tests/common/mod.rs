//! Shared helpers for the integration tests: a scripted completion client,
//! router construction, and small PDF fixtures built with lopdf.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use quizgen::{
    router, AppState, CompletionClient, CompletionRequest, PipelineStage, QuizConfig, QuizError,
    QuizGenerator, ServerConfig,
};
use std::sync::{Arc, Mutex};

/// Answers every stage deterministically and records each request.
pub struct FakeClient {
    selection: String,
    fail_stage: Option<PipelineStage>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl FakeClient {
    /// `selection` is returned verbatim by the sentence-selection stage.
    pub fn new(selection: &str) -> Arc<Self> {
        Arc::new(Self {
            selection: selection.to_string(),
            fail_stage: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Fails the first call made for `stage`.
    pub fn failing_at(selection: &str, stage: PipelineStage) -> Arc<Self> {
        Arc::new(Self {
            selection: selection.to_string(),
            fail_stage: Some(stage),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuizError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail_stage == Some(request.stage) {
            return Err(QuizError::completion("Invalid API Key"));
        }
        Ok(match request.stage {
            PipelineStage::Normalize => "Simplified text.".to_string(),
            PipelineStage::SelectSentences => self.selection.clone(),
            PipelineStage::GenerateQuestion(t) => {
                let sentence = request.user.lines().last().unwrap_or_default();
                format!("{t}: {sentence}")
            }
        })
    }
}

/// Router over `client` with default configuration.
pub fn app(client: Arc<FakeClient>) -> Router {
    app_with(client, QuizConfig::default(), &ServerConfig::default())
}

pub fn app_with(client: Arc<FakeClient>, config: QuizConfig, server: &ServerConfig) -> Router {
    let generator = QuizGenerator::new(client, config);
    router(AppState::new(generator), server)
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const BOUNDARY: &str = "quizgen-test-boundary";

/// `multipart/form-data` request with a single file field.
pub fn multipart_request(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"notes.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// One-page PDF showing `text` (or a blank page when `None`).
pub fn pdf_with_text(text: Option<&str>) -> Vec<u8> {
    pdf_with_pages(&[text])
}

/// PDF with one page per entry, in order; `None` is a page with no content.
pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
        };
        if let Some(text) = text {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", content_id);
        }
        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
