//! Completion-provider adapter.
//!
//! The pipeline never talks to a provider directly: it holds an
//! `Arc<dyn CompletionClient>` and sends one [`CompletionRequest`] per call.
//! [`ProviderClient`] is the production implementation on top of
//! `edgequake-llm`; tests plug in scripted fakes.
//!
//! Every call is single-shot. A failed call is returned as
//! [`QuizError::Completion`] and aborts the whole quiz.

use crate::config::StageOptions;
use crate::error::QuizError;
use crate::model::QuestionType;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which pipeline step a completion call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Normalize,
    SelectSentences,
    GenerateQuestion(QuestionType),
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Normalize => f.write_str("normalize"),
            PipelineStage::SelectSentences => f.write_str("select-sentences"),
            PipelineStage::GenerateQuestion(t) => write!(f, "generate-question({t})"),
        }
    }
}

/// One system + user prompt pair with its sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub stage: PipelineStage,
    pub system: String,
    pub user: String,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(
        stage: PipelineStage,
        system: impl Into<String>,
        user: impl Into<String>,
        options: StageOptions,
    ) -> Self {
        Self {
            stage,
            system: system.into(),
            user: user.into(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }
}

/// Anything that can turn a [`CompletionRequest`] into text.
///
/// Implementations return the trimmed content of the first completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuizError>;
}

/// [`CompletionClient`] backed by an `edgequake-llm` provider.
#[derive(Clone)]
pub struct ProviderClient {
    provider: Arc<dyn LLMProvider>,
    provider_name: String,
    model: String,
}

impl fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClient")
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .finish()
    }
}

/// Environment variable holding the API key for `provider_name`.
///
/// Returns `None` for local providers that need no key.
pub fn credential_var(provider_name: &str) -> Option<String> {
    let name = provider_name.trim().to_lowercase();
    match name.as_str() {
        "ollama" | "lmstudio" | "lm-studio" => None,
        "gemini" | "google" => Some("GEMINI_API_KEY".to_string()),
        "azure" => Some("AZURE_OPENAI_API_KEY".to_string()),
        other => Some(format!("{}_API_KEY", other.replace('-', "_").to_uppercase())),
    }
}

impl ProviderClient {
    /// Wrap an already constructed provider.
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        provider_name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            provider_name: provider_name.into(),
            model: model.into(),
        }
    }

    /// Build the process-wide client from the environment.
    ///
    /// Fails with [`QuizError::MissingCredential`] when the provider's API key
    /// variable is unset or empty. Call once at startup.
    pub fn connect(provider_name: &str, model: &str) -> Result<Self, QuizError> {
        if let Some(var) = credential_var(provider_name) {
            match std::env::var(&var) {
                Ok(v) if !v.trim().is_empty() => {}
                _ => {
                    return Err(QuizError::MissingCredential {
                        var,
                        provider: provider_name.to_string(),
                    })
                }
            }
        }

        let provider =
            ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
                QuizError::ProviderNotConfigured {
                    provider: provider_name.to_string(),
                    hint: format!("{e}"),
                }
            })?;

        info!("LLM provider ready: {} / {}", provider_name, model);
        Ok(Self::new(provider, provider_name, model))
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for ProviderClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuizError> {
        debug!(
            "{}: calling {} ({} prompt chars, max {} tokens)",
            request.stage,
            self.model,
            request.user.len(),
            request.max_tokens
        );

        let messages = vec![
            ChatMessage::system(request.system.as_str()),
            ChatMessage::user(request.user.as_str()),
        ];
        let options = build_options(request);

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| {
                warn!("{}: completion failed: {}", request.stage, e);
                QuizError::completion(e)
            })?;

        debug!(
            "{}: {} input tokens, {} output tokens",
            request.stage, response.prompt_tokens, response.completion_tokens
        );

        Ok(response.content.trim().to_string())
    }
}

/// Build `CompletionOptions` from a request.
fn build_options(request: &CompletionRequest) -> CompletionOptions {
    CompletionOptions {
        temperature: request.temperature,
        max_tokens: Some(request.max_tokens),
        ..Default::default()
    }
}
