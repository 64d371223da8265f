//! Quiz document rendering.
//!
//! The quiz is laid out as a flat list of paragraphs ([`quiz_paragraphs`]),
//! then packed into an in-memory `.docx` ([`render_docx`]). Order is
//! preserved and nothing is omitted.

use crate::error::QuizError;
use crate::model::Quiz;
use chrono::{DateTime, TimeZone};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;
use tracing::debug;

/// MIME type of the produced document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Heading paragraph at the top of every document.
pub const QUIZ_HEADING: &str = "Generated Quiz";

/// Heading size in half-points.
const HEADING_SIZE: usize = 40;

/// Paragraph texts, in document order.
///
/// `"Generated Quiz"`, then for each question `"Q{n}: {question}"` and
/// `"Type: {type}"` with `n` starting at 1.
pub fn quiz_paragraphs(quiz: &Quiz) -> Vec<String> {
    let mut paragraphs = Vec::with_capacity(1 + quiz.len() * 2);
    paragraphs.push(QUIZ_HEADING.to_string());
    for (i, q) in quiz.iter().enumerate() {
        paragraphs.push(format!("Q{}: {}", i + 1, q.question));
        paragraphs.push(format!("Type: {}", q.question_type));
    }
    paragraphs
}

/// Render the quiz into `.docx` bytes.
pub fn render_docx(quiz: &Quiz) -> Result<Vec<u8>, QuizError> {
    let mut paragraphs = quiz_paragraphs(quiz).into_iter();

    let mut docx = Docx::new();
    if let Some(heading) = paragraphs.next() {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(heading).bold().size(HEADING_SIZE)),
        );
    }
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| QuizError::Render(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!("Rendered {} questions into {} bytes", quiz.len(), bytes.len());
    Ok(bytes)
}

/// Attachment filename, `quiz_<YYYYMMDDHHMMSS>.docx`.
pub fn quiz_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("quiz_{}.docx", now.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionType, QuizQuestion};
    use chrono::Utc;

    fn sample_quiz() -> Quiz {
        vec![
            QuizQuestion {
                question: "What colour is the sky?".into(),
                question_type: QuestionType::MultipleChoice,
            },
            QuizQuestion {
                question: "The sky is green.".into(),
                question_type: QuestionType::TrueFalse,
            },
        ]
    }

    #[test]
    fn paragraphs_preserve_order() {
        assert_eq!(
            quiz_paragraphs(&sample_quiz()),
            vec![
                "Generated Quiz",
                "Q1: What colour is the sky?",
                "Type: multiple-choice",
                "Q2: The sky is green.",
                "Type: true/false",
            ]
        );
    }

    #[test]
    fn empty_quiz_has_heading_only() {
        assert_eq!(quiz_paragraphs(&Vec::new()), vec!["Generated Quiz"]);
    }

    #[test]
    fn docx_is_a_zip_archive() {
        let bytes = render_docx(&sample_quiz()).unwrap();
        assert!(bytes.starts_with(b"PK"), "docx must be a zip container");
    }

    #[test]
    fn filename_has_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(quiz_filename(&now), "quiz_20240309070501.docx");
    }
}
