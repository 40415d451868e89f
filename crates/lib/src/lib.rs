//! # docfill
//!
//! This crate turns the question text of a lab-report template into three
//! generated report sections (design, code, analysis) using a configurable AI
//! provider. The document side (scanning and filling `.docx` templates) lives in
//! `docfill-docx`.

pub mod constants;
pub mod errors;
pub mod parser;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::PromptError;
pub use parser::parse_ai_response;
pub use types::{
    Category, GeneratedContent, ProviderConfig, ProviderKind, ReportClient, ReportClientBuilder,
};

use tracing::{debug, info, warn};

impl ReportClient {
    /// Generates the three report sections for a document transcript.
    ///
    /// The transcript is embedded into the report prompt, sent to the provider
    /// and the reply parsed with [`parse_ai_response`]. Transport and API failures
    /// come back as `Err`; missing tags do not.
    pub async fn generate_sections(
        &self,
        transcript: &str,
    ) -> Result<GeneratedContent, PromptError> {
        if transcript.trim().is_empty() {
            warn!("[generate_sections] Transcript is empty; the model will only see the prompt.");
        }

        let prompt = prompts::render_report_prompt(&self.prompt_template, transcript);
        debug!(prompt = %prompt, "--> Sending report prompt to AI Provider");

        let raw_response = self.ai_provider.generate(&prompt).await?;
        info!(
            "[generate_sections] Received {} characters from AI provider.",
            raw_response.chars().count()
        );
        debug!("<-- Raw AI response: {}", &raw_response);

        parse_ai_response(&raw_response)
    }
}
