//! Progress-callback trait for quiz generation events.
//!
//! Inject an [`Arc<dyn QuizProgressCallback>`] via
//! [`crate::config::QuizConfigBuilder::progress_callback`] to observe the
//! pipeline as it runs: stage completions, how many sentences the model
//! selected, and every generated or dropped question.
//!
//! # Example
//!
//! ```rust
//! use quizgen::{QuestionType, QuizConfig, QuizProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct DropCounter {
//!     dropped: AtomicUsize,
//! }
//!
//! impl QuizProgressCallback for DropCounter {
//!     fn on_question_dropped(&self, sentence_index: usize, question_type: QuestionType) {
//!         self.dropped.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("sentence {sentence_index}: empty {question_type} question");
//!     }
//! }
//!
//! let config = QuizConfig::builder()
//!     .progress_callback(Arc::new(DropCounter { dropped: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::model::QuestionType;
use crate::pipeline::llm::PipelineStage;
use std::sync::Arc;

/// Called by the pipeline as it generates a quiz.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync`: one generator
/// is shared by every in-flight request.
pub trait QuizProgressCallback: Send + Sync {
    /// Called once before the first completion call.
    fn on_quiz_start(&self, requested_sentences: usize) {
        let _ = requested_sentences;
    }

    /// Called after each completion call returns successfully.
    fn on_stage_complete(&self, stage: PipelineStage) {
        let _ = stage;
    }

    /// Called once the selection stage output has been split into lines.
    ///
    /// `count` may differ from the requested number.
    fn on_sentences_selected(&self, count: usize) {
        let _ = count;
    }

    /// Called when a question is appended to the quiz.
    ///
    /// # Arguments
    /// * `index`: 0-based position in the quiz
    /// * `question_type`: type of the appended question
    fn on_question_generated(&self, index: usize, question_type: QuestionType) {
        let _ = (index, question_type);
    }

    /// Called when the model returned an empty question, which is skipped.
    ///
    /// # Arguments
    /// * `sentence_index`: 0-based index of the source sentence
    /// * `question_type`: type that came back empty
    fn on_question_dropped(&self, sentence_index: usize, question_type: QuestionType) {
        let _ = (sentence_index, question_type);
    }

    /// Called once after the last question call.
    fn on_quiz_complete(&self, total_questions: usize) {
        let _ = total_questions;
    }
}

/// A no-op implementation, used when no callback is configured.
pub struct NoopProgressCallback;

impl QuizProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::QuizConfig`].
pub type ProgressCallback = Arc<dyn QuizProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        stages: AtomicUsize,
        generated: AtomicUsize,
        dropped: AtomicUsize,
        selected: AtomicUsize,
    }

    impl QuizProgressCallback for TrackingCallback {
        fn on_stage_complete(&self, _stage: PipelineStage) {
            self.stages.fetch_add(1, Ordering::SeqCst);
        }

        fn on_sentences_selected(&self, count: usize) {
            self.selected.store(count, Ordering::SeqCst);
        }

        fn on_question_generated(&self, _index: usize, _question_type: QuestionType) {
            self.generated.fetch_add(1, Ordering::SeqCst);
        }

        fn on_question_dropped(&self, _sentence_index: usize, _question_type: QuestionType) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_quiz_start(5);
        cb.on_stage_complete(PipelineStage::Normalize);
        cb.on_sentences_selected(4);
        cb.on_question_generated(0, QuestionType::MultipleChoice);
        cb.on_question_dropped(0, QuestionType::TrueFalse);
        cb.on_quiz_complete(3);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_stage_complete(PipelineStage::Normalize);
        tracker.on_stage_complete(PipelineStage::SelectSentences);
        tracker.on_sentences_selected(2);
        tracker.on_question_generated(0, QuestionType::MultipleChoice);
        tracker.on_question_dropped(0, QuestionType::TrueFalse);

        assert_eq!(tracker.stages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.selected.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.generated.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.dropped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_quiz_start(10);
        cb.on_quiz_complete(40);
    }
}
