//! # Fill Configuration
//!
//! The keyword map, style sheet and paragraph layout used by one fill pass.
//! Built once (defaults, or a YAML file overriding parts of them) and passed
//! explicitly to the fill functions.

use crate::errors::DocxError;
use crate::locator::CategoryKeywordMap;
use crate::style::{ParagraphLayout, StyleSheet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    pub keywords: CategoryKeywordMap,
    pub styles: StyleSheet,
    pub layout: ParagraphLayout,
}

impl FillConfig {
    /// Parses a YAML document. Sections it omits keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DocxError> {
        let config: FillConfig =
            serde_yaml::from_str(yaml).map_err(|e| DocxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocxError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        info!("Loaded fill configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DocxError> {
        self.keywords.validate().map_err(DocxError::Config)?;
        self.styles.validate().map_err(DocxError::Config)?;
        if self.layout.space_before_pt.is_nan() || self.layout.space_before_pt < 0.0 {
            return Err(DocxError::Config(
                "layout.space_before_pt must not be negative".to_string(),
            ));
        }
        if self.layout.line_spacing.is_nan() || self.layout.line_spacing <= 0.0 {
            return Err(DocxError::Config(
                "layout.line_spacing must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
