//! # Prompt Template Modules
//!
//! This module organizes the prompt templates sent to the AI backend.
//! The tag vocabulary used in these templates is the wire contract with
//! [`crate::parser`]; change both together.

pub mod report;

/// Substitutes `{context}` in `template` with the document transcript.
pub fn render_report_prompt(template: &str, context: &str) -> String {
    template.replace("{context}", context)
}
