//! Configuration types for quiz generation and the HTTP server.
//!
//! Pipeline behaviour is controlled through [`QuizConfig`], built via
//! [`QuizConfigBuilder`]. Setters clamp to sane ranges; `build()` rejects the
//! values that cannot be clamped. The server's bind address and upload limit
//! live in the separate [`ServerConfig`].

use crate::error::QuizError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling parameters for one kind of completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageOptions {
    /// Upper bound on generated tokens.
    pub max_tokens: usize,
    /// Sampling temperature. `None` leaves the provider default in place.
    pub temperature: Option<f32>,
}

impl StageOptions {
    pub const fn new(max_tokens: usize, temperature: Option<f32>) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// Configuration for the quiz pipeline.
///
/// # Example
/// ```rust
/// use quizgen::{QuizConfig, StageOptions};
///
/// let config = QuizConfig::builder()
///     .normalize(StageOptions::new(800, Some(0.5)))
///     .upload_num_questions(5)
///     .build()
///     .unwrap();
/// assert_eq!(config.upload_num_questions, 5);
/// ```
#[derive(Clone)]
pub struct QuizConfig {
    /// Normalize stage. Default: 500 tokens, temperature 0.7.
    pub normalize: StageOptions,

    /// Sentence-selection stage. Default: 300 tokens, provider temperature.
    pub select: StageOptions,

    /// Per-question stage. Default: 200 tokens, provider temperature.
    pub question: StageOptions,

    /// Sentences requested for `POST /upload-pdf/`. Default: 10.
    pub upload_num_questions: usize,

    /// Optional observer for pipeline events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            normalize: StageOptions::new(500, Some(0.7)),
            select: StageOptions::new(300, None),
            question: StageOptions::new(200, None),
            upload_num_questions: 10,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizConfig")
            .field("normalize", &self.normalize)
            .field("select", &self.select)
            .field("question", &self.question)
            .field("upload_num_questions", &self.upload_num_questions)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn QuizProgressCallback>"),
            )
            .finish()
    }
}

impl QuizConfig {
    /// Create a new builder for `QuizConfig`.
    pub fn builder() -> QuizConfigBuilder {
        QuizConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`QuizConfig`].
#[derive(Debug)]
pub struct QuizConfigBuilder {
    config: QuizConfig,
}

fn clamp_stage(options: StageOptions) -> StageOptions {
    StageOptions {
        max_tokens: options.max_tokens,
        temperature: options.temperature.map(|t| t.clamp(0.0, 2.0)),
    }
}

impl QuizConfigBuilder {
    pub fn normalize(mut self, options: StageOptions) -> Self {
        self.config.normalize = clamp_stage(options);
        self
    }

    pub fn select(mut self, options: StageOptions) -> Self {
        self.config.select = clamp_stage(options);
        self
    }

    pub fn question(mut self, options: StageOptions) -> Self {
        self.config.question = clamp_stage(options);
        self
    }

    pub fn upload_num_questions(mut self, n: usize) -> Self {
        self.config.upload_num_questions = n;
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<QuizConfig, QuizError> {
        let c = &self.config;
        for (name, stage) in [
            ("normalize", &c.normalize),
            ("select", &c.select),
            ("question", &c.question),
        ] {
            if stage.max_tokens == 0 {
                return Err(QuizError::InvalidConfig(format!(
                    "{name} max_tokens must be ≥ 1"
                )));
            }
        }
        if c.upload_num_questions == 0 {
            return Err(QuizError::InvalidConfig(
                "upload_num_questions must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind. Default: `0.0.0.0`.
    pub host: String,
    /// TCP port. Default: 8000.
    pub port: u16,
    /// Largest accepted request body, in bytes. Default: 20 MiB.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;
    use std::sync::Arc;

    #[test]
    fn defaults_match_stage_limits() {
        let c = QuizConfig::default();
        assert_eq!(c.normalize, StageOptions::new(500, Some(0.7)));
        assert_eq!(c.select, StageOptions::new(300, None));
        assert_eq!(c.question, StageOptions::new(200, None));
        assert_eq!(c.upload_num_questions, 10);
    }

    #[test]
    fn builder_clamps_temperature() {
        let c = QuizConfig::builder()
            .normalize(StageOptions::new(100, Some(9.0)))
            .question(StageOptions::new(100, Some(-1.0)))
            .build()
            .unwrap();
        assert_eq!(c.normalize.temperature, Some(2.0));
        assert_eq!(c.question.temperature, Some(0.0));
    }

    #[test]
    fn builder_rejects_zero_tokens() {
        let err = QuizConfig::builder()
            .select(StageOptions::new(0, None))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("select"), "got: {err}");
    }

    #[test]
    fn builder_rejects_zero_upload_questions() {
        assert!(QuizConfig::builder().upload_num_questions(0).build().is_err());
    }

    #[test]
    fn debug_hides_callback() {
        let c = QuizConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        assert!(format!("{c:?}").contains("<dyn QuizProgressCallback>"));
    }

    #[test]
    fn server_bind_address() {
        let s = ServerConfig {
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(s.bind_address(), "0.0.0.0:9000");
    }
}
