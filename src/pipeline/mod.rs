//! Pipeline stages for quiz generation.
//!
//! Each submodule implements exactly one step; [`crate::generate`] wires
//! them together.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ llm (normalize) ──▶ llm (select) ──▶ sentences ──▶ llm (×4 per sentence) ──▶ render
//! (lopdf)                                          (split)                                 (docx)
//! ```
//!
//! 1. [`extract`]: PDF bytes to plain text; runs in `spawn_blocking`
//! 2. [`llm`]: the completion-provider seam; the only stage with
//!    network I/O
//! 3. [`sentences`]: split the selection output into sentence lines
//! 4. [`render`]: write the quiz into an in-memory `.docx`

pub mod extract;
pub mod llm;
pub mod render;
pub mod sentences;
