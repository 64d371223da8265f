//! Prompts for each pipeline stage.
//!
//! Every prompt lives here so tests can inspect them directly without a
//! provider, and so prompt changes touch exactly one file.

use crate::model::QuestionType;

/// System prompt for the normalize stage.
pub const NORMALIZE_SYSTEM_PROMPT: &str =
    "You are an expert in simplifying text for educational purposes.";

/// User prompt for the normalize stage.
pub fn normalize_prompt(text: &str) -> String {
    format!(
        "Normalize and simplify the following text for question generation:\n{}",
        text
    )
}

/// System prompt for the sentence-selection stage.
pub fn select_system_prompt(num_questions: usize) -> String {
    format!(
        "You are an expert in identifying {} important sentences for quizzes.",
        num_questions
    )
}

/// User prompt for the sentence-selection stage.
pub fn select_prompt(text: &str, num_questions: usize) -> String {
    format!(
        "Select {} most important sentences from the following text for creating quiz questions:\n{}",
        num_questions, text
    )
}

/// System prompt for a single question.
pub fn question_system_prompt(question_type: QuestionType) -> String {
    format!(
        "You are an expert in generating {} quiz questions.",
        question_type.prompt_name()
    )
}

/// User prompt for a single question.
pub fn question_prompt(sentence: &str, question_type: QuestionType) -> String {
    format!(
        "Create a {} question from the following sentence:\n{}",
        question_type.prompt_name(),
        sentence
    )
}
