//! Server binary for quizgen.
//!
//! A thin shim over the library crate: maps CLI flags to `QuizConfig` and
//! `ServerConfig`, connects the LLM provider once, and serves the router.

use anyhow::{Context, Result};
use clap::Parser;
use quizgen::{
    router, AppState, ProviderClient, QuizConfig, QuizGenerator, ServerConfig, StageOptions,
};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port with OpenAI
  export OPENAI_API_KEY=sk-...
  quizgen

  # Groq, Llama 3
  export GROQ_API_KEY=gsk_...
  quizgen --provider groq --model llama3-70b-8192

  # Generate a quiz
  curl -X POST localhost:8000/generate/ \
       -H 'content-type: application/json' \
       -d '{"text": "The mitochondria is the powerhouse of the cell.", "num_questions": 2}'

  # Quiz from a PDF, saved as .docx
  curl -X POST localhost:8000/upload-pdf/ -F file=@notes.pdf -o quiz.docx

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key (required for --provider openai)
  <PROVIDER>_API_KEY      API key for any other provider, e.g. GROQ_API_KEY
  EDGEQUAKE_LLM_PROVIDER  Override provider
  EDGEQUAKE_MODEL         Override model ID
  RUST_LOG                Log filter, e.g. quizgen=debug,tower_http=info
"#;

/// Serve an HTTP API that turns text and PDFs into quizzes using LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "quizgen",
    version,
    about = "Serve an HTTP API that turns text and PDFs into quizzes using LLMs",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "QUIZGEN_HOST", default_value = "0.0.0.0")]
    host: String,

    /// TCP port.
    #[arg(short, long, env = "QUIZGEN_PORT", default_value_t = 8000)]
    port: u16,

    /// LLM provider: openai, anthropic, gemini, groq, ollama, …
    #[arg(long, env = "EDGEQUAKE_LLM_PROVIDER", default_value = "openai")]
    provider: String,

    /// LLM model ID.
    #[arg(long, env = "EDGEQUAKE_MODEL", default_value = "gpt-4.1-mini")]
    model: String,

    /// Largest accepted request body in MiB.
    #[arg(long, env = "QUIZGEN_MAX_UPLOAD_MB", default_value_t = 20)]
    max_upload_mb: usize,

    /// Sentences requested for PDF uploads.
    #[arg(long, env = "QUIZGEN_UPLOAD_QUESTIONS", default_value_t = 10)]
    upload_questions: usize,

    /// Temperature of the normalize stage (0.0–2.0).
    #[arg(long, env = "QUIZGEN_NORMALIZE_TEMPERATURE", default_value_t = 0.7)]
    normalize_temperature: f32,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "QUIZGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "QUIZGEN_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Provider (fatal when the credential is missing) ──────────────────
    let client = ProviderClient::connect(&cli.provider, &cli.model)
        .context("Failed to initialise the LLM provider")?;

    // ── Build config ─────────────────────────────────────────────────────
    let defaults = QuizConfig::default();
    let quiz_config = QuizConfig::builder()
        .normalize(StageOptions::new(
            defaults.normalize.max_tokens,
            Some(cli.normalize_temperature),
        ))
        .upload_num_questions(cli.upload_questions)
        .build()
        .context("Invalid configuration")?;

    let server_config = ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        max_upload_bytes: cli.max_upload_mb.saturating_mul(1024 * 1024),
    };

    let state = AppState::new(QuizGenerator::new(Arc::new(client), quiz_config));
    let app = router(state, &server_config);

    // ── Serve ────────────────────────────────────────────────────────────
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(
        "Quiz Generation API listening on http://{} ({} / {})",
        address, cli.provider, cli.model
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
