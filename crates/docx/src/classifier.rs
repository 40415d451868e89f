//! # Content Classifier
//!
//! Decides which [`StyleKind`] a generated line is rendered with. The policy is
//! an ordered list of rules; the first rule whose matcher accepts the line wins.
//! Only the code section is classified; every other section uses [`LineClassifier::plain`].

use crate::errors::DocxError;
use crate::style::StyleKind;
use regex::Regex;

/// An item number at the start of a line: `(1)` or `（1）`, half- or full-width.
pub const ITEM_NUMBER_PATTERN: &str = r"^\s*[（(]\d+[）)]";

/// Upper-cased substrings that mark a line as a code or query statement.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "CREATE",
    "INSERT",
    "UPDATE",
    "SELECT",
    "ALTER",
    "DROP",
    "TABLE",
    "TRIGGER",
    "PROCEDURE",
    "DECLARE",
    "BEGIN",
    "END",
];

/// Statement terminator and comment marker.
pub const STATEMENT_MARKERS: &[&str] = &[";", "--"];

#[derive(Debug, Clone)]
pub enum LineMatcher {
    /// Matches lines starting with an item number.
    ItemNumber(Regex),
    /// Matches lines whose upper-cased form contains a keyword, or that
    /// contain a marker verbatim.
    Statement {
        keywords: Vec<String>,
        markers: Vec<String>,
    },
    /// Matches every line.
    Any,
}

impl LineMatcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            LineMatcher::ItemNumber(pattern) => pattern.is_match(line),
            LineMatcher::Statement { keywords, markers } => {
                let upper = line.to_uppercase();
                keywords.iter().any(|k| upper.contains(k.as_str()))
                    || markers.iter().any(|m| line.contains(m.as_str()))
            }
            LineMatcher::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineRule {
    pub matcher: LineMatcher,
    pub style: StyleKind,
}

/// An ordered rule list.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Vec<LineRule>,
}

impl LineClassifier {
    pub fn new(rules: Vec<LineRule>) -> Self {
        Self { rules }
    }

    /// Item number, then statement, then body.
    pub fn code() -> Result<Self, DocxError> {
        let item_number =
            Regex::new(ITEM_NUMBER_PATTERN).map_err(|e| DocxError::Config(e.to_string()))?;
        Ok(Self::new(vec![
            LineRule {
                matcher: LineMatcher::ItemNumber(item_number),
                style: StyleKind::Heading,
            },
            LineRule {
                matcher: LineMatcher::Statement {
                    keywords: STATEMENT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
                    markers: STATEMENT_MARKERS.iter().map(|s| s.to_string()).collect(),
                },
                style: StyleKind::Code,
            },
            LineRule {
                matcher: LineMatcher::Any,
                style: StyleKind::Body,
            },
        ]))
    }

    /// Every line is body text.
    pub fn plain() -> Self {
        Self::new(vec![LineRule {
            matcher: LineMatcher::Any,
            style: StyleKind::Body,
        }])
    }

    /// The style of the first matching rule, or body when none match.
    pub fn classify(&self, line: &str) -> StyleKind {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(line))
            .map(|rule| rule.style)
            .unwrap_or(StyleKind::Body)
    }
}
