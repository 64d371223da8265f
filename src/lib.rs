//! # quizgen
//!
//! Generate quizzes from plain text or PDF documents using Large Language
//! Models, served over HTTP.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text / PDF
//!  │
//!  ├─ 1. Extract    PDF bytes → plain text (lopdf, spawn_blocking)
//!  ├─ 2. Normalize  one LLM call simplifies the source text
//!  ├─ 3. Select     one LLM call picks N key sentences (one per line)
//!  ├─ 4. Generate   one LLM call per (sentence, question type), sequential
//!  └─ 5. Output     JSON `{quiz: [...]}` or a .docx document
//! ```
//!
//! A run over `k` selected sentences issues exactly `2 + 4k` completion calls.
//! Any failure aborts the whole run; there is no partial quiz.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quizgen::{ProviderClient, QuizConfig, QuizGenerator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads OPENAI_API_KEY
//!     let client = ProviderClient::connect("openai", "gpt-4.1-mini")?;
//!     let generator = QuizGenerator::new(Arc::new(client), QuizConfig::default());
//!     let quiz = generator.generate_quiz("Water boils at 100 °C at sea level.", 3).await?;
//!     for q in &quiz {
//!         println!("[{}] {}", q.question_type, q.question);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `quizgen` server binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{QuizConfig, QuizConfigBuilder, ServerConfig, StageOptions};
pub use error::QuizError;
pub use generate::QuizGenerator;
pub use model::{QuestionType, Quiz, QuizQuestion, QuizRequest, QuizResponse};
pub use pipeline::llm::{CompletionClient, CompletionRequest, PipelineStage, ProviderClient};
pub use progress::{NoopProgressCallback, ProgressCallback, QuizProgressCallback};
pub use server::{router, AppState};
