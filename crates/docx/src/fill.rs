//! # Fill Orchestrator
//!
//! Loads a fresh copy of the template, fills every category's placeholder in
//! a single traversal and serializes the result.

use crate::config::FillConfig;
use crate::document::Document;
use crate::errors::DocxError;
use crate::locator::{fill_placeholders, FillStatus};
use docfill::GeneratedContent;
use tracing::{info, instrument, warn};

/// The rewritten package and what was filled in it.
#[derive(Debug, Clone)]
pub struct FilledDocument {
    pub bytes: Vec<u8>,
    pub status: FillStatus,
}

/// Fills a template with generated content.
///
/// `original` must be the unmodified template bytes; the scan and the fill
/// each parse their own copy from it. A category whose keywords match no cell
/// is left unfilled and reported in [`FilledDocument::status`], not as an
/// error. Load and save faults are returned as errors.
#[instrument(skip_all, fields(template_len = original.len()))]
pub fn fill_template(
    original: &[u8],
    content: &GeneratedContent,
    config: &FillConfig,
) -> Result<FilledDocument, DocxError> {
    let mut document = Document::from_bytes(original)?;
    let status = fill_placeholders(&mut document, content, config)?;

    for category in status.unfilled() {
        warn!(
            "No placeholder cell matched the '{}' keywords {:?}; section left unfilled.",
            category,
            config.keywords.keywords(category)
        );
    }

    let bytes = document.to_bytes()?;
    info!(
        "Serialized filled document ({} bytes, {} of 3 sections filled).",
        bytes.len(),
        3 - status.unfilled().len()
    );
    Ok(FilledDocument { bytes, status })
}
