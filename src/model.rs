//! Request and response types.
//!
//! Nothing here outlives a single request/response cycle: there are no
//! identifiers and no persistence.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of sentences requested when the client omits the field.
pub const DEFAULT_NUM_QUESTIONS: i64 = 10;

fn default_num_questions() -> i64 {
    DEFAULT_NUM_QUESTIONS
}

/// Body of `POST /generate/` and `POST /download/`.
///
/// `num_questions` is signed so that `0` and negative values deserialise and
/// are rejected by [`QuizRequest::validate`] with a `400`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub text: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: i64,
}

impl QuizRequest {
    pub fn new(text: impl Into<String>, num_questions: i64) -> Self {
        Self {
            text: text.into(),
            num_questions,
        }
    }

    /// Check the request and return the validated sentence count.
    pub fn validate(&self) -> Result<usize, QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::Validation("Text cannot be empty".into()));
        }
        if self.num_questions < 1 {
            return Err(QuizError::Validation(
                "Number of questions must be at least 1".into(),
            ));
        }
        usize::try_from(self.num_questions)
            .map_err(|_| QuizError::Validation("Number of questions is too large".into()))
    }
}

/// The four question formats, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "true/false")]
    TrueFalse,
    #[serde(rename = "question/answer")]
    QuestionAnswer,
    #[serde(rename = "fill-in-the-blanks")]
    FillInTheBlanks,
}

impl QuestionType {
    /// Every type, in the order questions are generated for each sentence.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::QuestionAnswer,
        QuestionType::FillInTheBlanks,
    ];

    /// Label used in JSON and in the rendered document.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true/false",
            QuestionType::QuestionAnswer => "question/answer",
            QuestionType::FillInTheBlanks => "fill-in-the-blanks",
        }
    }

    /// Phrase used when asking the model for a question of this type.
    pub fn prompt_name(self) -> &'static str {
        match self {
            QuestionType::FillInTheBlanks => "fill in the blanks",
            other => other.label(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// Ordered questions: sentence-major, type-minor. No deduplication.
pub type Quiz = Vec<QuizQuestion>;

/// Body returned by `POST /generate/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub quiz: Quiz,
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
