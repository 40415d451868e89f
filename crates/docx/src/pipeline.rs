//! # Report Pipeline
//!
//! One generation request end to end: scan the template, generate the
//! sections, fill the template.

use crate::config::FillConfig;
use crate::errors::ReportError;
use crate::fill::fill_template;
use crate::locator::FillStatus;
use crate::scanner::extract_transcript;
use docfill::{GeneratedContent, ReportClient};
use tracing::{info, instrument};

/// The outcome of a successful generation request.
#[derive(Debug, Clone)]
pub struct Report {
    /// The filled `.docx` package.
    pub bytes: Vec<u8>,
    pub status: FillStatus,
    /// The parsed sections, for previewing alongside the document.
    pub content: GeneratedContent,
}

/// Scans `template`, asks `client` for the report sections and fills them in.
///
/// Provider and parse failures return [`ReportError::Generation`] and no
/// document is produced.
#[instrument(skip_all, fields(template_len = template.len()))]
pub async fn generate_report(
    template: &[u8],
    client: &ReportClient,
    config: &FillConfig,
) -> Result<Report, ReportError> {
    info!("[generate_report] Scanning template.");
    let transcript = extract_transcript(template)?;

    info!("[generate_report] Requesting report sections from AI provider.");
    let content = client.generate_sections(&transcript).await?;

    info!("[generate_report] Filling placeholders.");
    let filled = fill_template(template, &content, config)?;

    Ok(Report {
        bytes: filled.bytes,
        status: filled.status,
        content,
    })
}
