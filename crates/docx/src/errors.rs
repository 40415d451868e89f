use docfill::PromptError;
use thiserror::Error;

/// Faults while reading or writing a document package. These are always fatal
/// to the request: no partial document is produced.
#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Failed to read document package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Failed to parse document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Failed to write document XML: {0}")]
    XmlWrite(String),
    #[error("Document XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    Malformed(String),
    #[error("Invalid fill configuration: {0}")]
    Config(String),
}

/// Errors from the end-to-end generate-and-fill pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Transport, provider or parse failure. Recoverable: the caller reports
    /// the message and no document is produced.
    #[error("Generation failed: {0}")]
    Generation(#[from] PromptError),
    /// Loading or saving the document failed.
    #[error("Document processing failed: {0}")]
    Document(#[from] DocxError),
}
