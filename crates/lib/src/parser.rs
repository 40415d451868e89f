//! # Response Parser
//!
//! Extracts the `<design>`, `<code>` and `<analysis>` sections from a raw
//! model response. Language models frequently omit or truncate a section, so a
//! missing tag is replaced by a visible sentinel instead of failing the parse.

use crate::constants::{
    MISSING_ANALYSIS_SENTINEL, MISSING_CODE_SENTINEL, MISSING_DESIGN_SENTINEL,
};
use crate::errors::PromptError;
use crate::types::{Category, GeneratedContent};
use regex::Regex;
use tracing::{debug, warn};

/// Compiled extraction patterns for the three tagged sections.
#[derive(Debug, Clone)]
pub struct SectionParser {
    design: Regex,
    code: Regex,
    analysis: Regex,
}

impl SectionParser {
    pub fn new() -> Result<Self, PromptError> {
        Ok(Self {
            design: section_pattern(Category::Design)?,
            code: section_pattern(Category::Code)?,
            analysis: section_pattern(Category::Analysis)?,
        })
    }

    /// Parses `text` into [`GeneratedContent`], substituting sentinels for missing tags.
    pub fn parse(&self, text: &str) -> GeneratedContent {
        GeneratedContent {
            design: extract(&self.design, text, Category::Design),
            code: extract(&self.code, text, Category::Code),
            analysis: extract(&self.analysis, text, Category::Analysis),
        }
    }
}

/// Non-greedy, case-sensitive, newline-spanning match of `<tag>…</tag>`.
fn section_pattern(category: Category) -> Result<Regex, PromptError> {
    let tag = category.tag();
    Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>"))
        .map_err(|e| PromptError::ParseFailed(e.to_string()))
}

fn extract(pattern: &Regex, text: &str, category: Category) -> String {
    match pattern.captures(text).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => {
            warn!("AI response is missing the <{}> section.", category.tag());
            missing_sentinel(category).to_string()
        }
    }
}

/// The placeholder text used when `category` is absent from a response.
pub fn missing_sentinel(category: Category) -> &'static str {
    match category {
        Category::Design => MISSING_DESIGN_SENTINEL,
        Category::Code => MISSING_CODE_SENTINEL,
        Category::Analysis => MISSING_ANALYSIS_SENTINEL,
    }
}

/// Parses a raw model response.
///
/// Only an internal fault yields an error; absent tags degrade to sentinels.
pub fn parse_ai_response(text: &str) -> Result<GeneratedContent, PromptError> {
    let parser = SectionParser::new()?;
    let content = parser.parse(text);
    debug!(
        design_len = content.design.len(),
        code_len = content.code.len(),
        analysis_len = content.analysis.len(),
        "Parsed AI response"
    );
    Ok(content)
}
