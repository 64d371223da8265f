//! Quiz generation pipeline.
//!
//! [`QuizGenerator::generate_quiz`] runs three kinds of completion calls,
//! strictly one after another:
//!
//! 1. **Normalize** the source text (one call).
//! 2. **Select** `n` key sentences from the normalized text (one call), then
//!    split the answer into lines.
//! 3. **Generate** one question per (sentence, type) pair, for the four types
//!    in [`QuestionType::ALL`] order (4 calls per sentence).
//!
//! That is `2 + 4k` calls for `k` selected lines. The first failed call aborts
//! the run and nothing generated so far is returned.

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::model::{QuestionType, Quiz, QuizQuestion};
use crate::pipeline::llm::{CompletionClient, CompletionRequest, PipelineStage};
use crate::pipeline::sentences::split_sentences;
use crate::progress::ProgressCallback;
use crate::prompts;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the quiz pipeline against a shared completion client.
///
/// Cheap to share: wrap it in an `Arc` and hand it to every request.
pub struct QuizGenerator {
    client: Arc<dyn CompletionClient>,
    config: QuizConfig,
}

impl fmt::Debug for QuizGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizGenerator")
            .field("client", &"<dyn CompletionClient>")
            .field("config", &self.config)
            .finish()
    }
}

impl QuizGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, config: QuizConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Generate a quiz from `text`, asking for `num_questions` sentences.
    ///
    /// # Errors
    /// Returns the first [`QuizError`] raised by any completion call.
    pub async fn generate_quiz(&self, text: &str, num_questions: usize) -> Result<Quiz, QuizError> {
        let start = Instant::now();
        let progress = self.config.progress_callback.as_ref();
        info!(
            "Generating quiz: {} chars of text, {} sentences requested",
            text.len(),
            num_questions
        );
        if let Some(cb) = progress {
            cb.on_quiz_start(num_questions);
        }

        // ── Stage 1: Normalize ───────────────────────────────────────────
        let normalized = self.normalize(text).await?;
        notify_stage(progress, PipelineStage::Normalize);

        // ── Stage 2: Select sentences ────────────────────────────────────
        let sentences = self.select_sentences(&normalized, num_questions).await?;
        notify_stage(progress, PipelineStage::SelectSentences);
        if sentences.len() != num_questions {
            debug!(
                "Model selected {} sentences ({} requested)",
                sentences.len(),
                num_questions
            );
        }
        if let Some(cb) = progress {
            cb.on_sentences_selected(sentences.len());
        }

        // ── Stage 3: One question per (sentence, type) ───────────────────
        let mut quiz: Quiz = Vec::with_capacity(sentences.len() * QuestionType::ALL.len());
        let mut dropped = 0usize;
        for (sentence_index, sentence) in sentences.iter().enumerate() {
            for question_type in QuestionType::ALL {
                let question = self.generate_question(sentence, question_type).await?;
                notify_stage(progress, PipelineStage::GenerateQuestion(question_type));

                if question.trim().is_empty() {
                    dropped += 1;
                    warn!(
                        "Sentence {}: empty {} question dropped",
                        sentence_index + 1,
                        question_type
                    );
                    if let Some(cb) = progress {
                        cb.on_question_dropped(sentence_index, question_type);
                    }
                    continue;
                }

                if let Some(cb) = progress {
                    cb.on_question_generated(quiz.len(), question_type);
                }
                quiz.push(QuizQuestion {
                    question,
                    question_type,
                });
            }
        }

        info!(
            "Quiz complete: {} questions from {} sentences ({} dropped), {} completion calls, {}ms",
            quiz.len(),
            sentences.len(),
            dropped,
            2 + sentences.len() * QuestionType::ALL.len(),
            start.elapsed().as_millis()
        );
        if let Some(cb) = progress {
            cb.on_quiz_complete(quiz.len());
        }

        Ok(quiz)
    }

    async fn normalize(&self, text: &str) -> Result<String, QuizError> {
        let request = CompletionRequest::new(
            PipelineStage::Normalize,
            prompts::NORMALIZE_SYSTEM_PROMPT,
            prompts::normalize_prompt(text),
            self.config.normalize,
        );
        self.client.complete(&request).await
    }

    async fn select_sentences(
        &self,
        text: &str,
        num_questions: usize,
    ) -> Result<Vec<String>, QuizError> {
        let request = CompletionRequest::new(
            PipelineStage::SelectSentences,
            prompts::select_system_prompt(num_questions),
            prompts::select_prompt(text, num_questions),
            self.config.select,
        );
        let raw = self.client.complete(&request).await?;
        Ok(split_sentences(&raw))
    }

    async fn generate_question(
        &self,
        sentence: &str,
        question_type: QuestionType,
    ) -> Result<String, QuizError> {
        let request = CompletionRequest::new(
            PipelineStage::GenerateQuestion(question_type),
            prompts::question_system_prompt(question_type),
            prompts::question_prompt(sentence, question_type),
            self.config.question,
        );
        let question = self.client.complete(&request).await?;
        Ok(question.trim().to_string())
    }
}

fn notify_stage(progress: Option<&ProgressCallback>, stage: PipelineStage) {
    if let Some(cb) = progress {
        cb.on_stage_complete(stage);
    }
}
