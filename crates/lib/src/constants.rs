//! # Shared Constants
//!
//! Constants shared by the `docfill` crates: response sentinels and output naming.

/// Substituted for the design section when the `<design>` tag is missing.
pub const MISSING_DESIGN_SENTINEL: &str = "AI生成格式缺失(Design)";

/// Substituted for the code section when the `<code>` tag is missing.
pub const MISSING_CODE_SENTINEL: &str = "AI生成格式缺失(Code)";

/// Substituted for the analysis section when the `<analysis>` tag is missing.
pub const MISSING_ANALYSIS_SENTINEL: &str = "AI生成格式缺失(Analysis)";

/// Prefix added to the original file name of a filled report.
pub const OUTPUT_FILE_PREFIX: &str = "Done_";

/// MIME type of the produced document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Builds the output file name for a filled copy of `original`.
pub fn output_file_name(original: &str) -> String {
    format!("{OUTPUT_FILE_PREFIX}{original}")
}
