//! # docfill-docx: Template Filling for `.docx` Reports
//!
//! This crate holds the document side of `docfill`: reading a `.docx` template
//! into an editable tree, extracting its question text, and rewriting the
//! placeholder cells with generated, styled content.
//!
//! The two operations a host needs are [`extract_transcript`] and
//! [`fill_template`]; [`generate_report`] chains them around a
//! [`docfill::ReportClient`] call.

pub mod classifier;
pub mod config;
pub mod document;
pub mod errors;
pub mod fill;
pub mod locator;
pub mod pipeline;
pub mod render;
pub mod scanner;
pub mod style;
pub mod xml;

pub use config::FillConfig;
pub use document::Document;
pub use errors::{DocxError, ReportError};
pub use fill::{fill_template, FilledDocument};
pub use locator::{CategoryKeywordMap, FillStatus};
pub use pipeline::{generate_report, Report};
pub use scanner::extract_transcript;
pub use style::{StyleKind, StyleProfile, StyleSheet};
