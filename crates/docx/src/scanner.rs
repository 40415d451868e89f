//! # Document Scanner
//!
//! Flattens a document into the transcript submitted to the language model.

use crate::document::Document;
use crate::errors::DocxError;
use tracing::info;

impl Document {
    /// Builds the transcript: every non-blank table cell (table, row, cell
    /// order), then every non-blank top-level paragraph, one per line.
    pub fn transcript(&self) -> String {
        let mut lines = Vec::new();

        for table in self.tables() {
            for row in table.rows() {
                for cell in row.cells() {
                    let text = cell.text();
                    if !text.trim().is_empty() {
                        lines.push(text);
                    }
                }
            }
        }

        for paragraph in self.paragraphs() {
            let text = paragraph.text();
            if !text.trim().is_empty() {
                lines.push(text);
            }
        }

        lines.join("\n")
    }
}

/// Loads a `.docx` package and returns its transcript.
pub fn extract_transcript(bytes: &[u8]) -> Result<String, DocxError> {
    let document = Document::from_bytes(bytes)?;
    let transcript = document.transcript();
    info!(
        "Extracted transcript of {} characters.",
        transcript.chars().count()
    );
    Ok(transcript)
}
