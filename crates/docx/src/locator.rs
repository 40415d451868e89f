//! # Placeholder Locator & Eraser
//!
//! Finds the placeholder cell of each category by keyword substring and clears
//! the instructional paragraphs inside it.
//!
//! Only paragraphs containing one of the category's keywords are cleared.
//! A heading sharing the cell survives as long as it contains none of the
//! keywords, so keyword lists must never include text that appears in a
//! template's section titles.

use crate::classifier::LineClassifier;
use crate::config::FillConfig;
use crate::document::Document;
use crate::errors::DocxError;
use crate::render::write_content;
use docfill::{Category, GeneratedContent};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Keywords locating one category's placeholder cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Category to keyword list mapping, in priority order.
///
/// When one cell matches several categories, the earliest entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKeywordMap(Vec<CategoryKeywords>);

impl CategoryKeywordMap {
    pub fn new(entries: Vec<CategoryKeywords>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[CategoryKeywords] {
        &self.0
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.0
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Rejects empty keywords (they would match every cell) and duplicate categories.
    pub fn validate(&self) -> Result<(), String> {
        for (index, entry) in self.0.iter().enumerate() {
            if self.0[..index].iter().any(|e| e.category == entry.category) {
                return Err(format!("category '{}' listed twice", entry.category));
            }
            if entry.keywords.iter().any(|k| k.is_empty()) {
                return Err(format!("category '{}' has an empty keyword", entry.category));
            }
        }
        Ok(())
    }
}

impl Default for CategoryKeywordMap {
    fn default() -> Self {
        fn entry(category: Category, keywords: &[&str]) -> CategoryKeywords {
            CategoryKeywords {
                category,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }
        Self(vec![
            entry(
                Category::Code,
                &["直接粘贴过来", "格式为", "运行代码", "粘贴代码", "截图"],
            ),
            entry(
                Category::Analysis,
                &["具体分析", "改进的办法", "错误原因分析", "心得", "问题或错误"],
            ),
            entry(Category::Design, &["撰写上述内容", "基本语法", "上述内容"]),
        ])
    }
}

/// Which categories have been filled during one fill operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillStatus {
    pub design: bool,
    pub code: bool,
    pub analysis: bool,
}

impl FillStatus {
    pub fn is_filled(&self, category: Category) -> bool {
        match category {
            Category::Design => self.design,
            Category::Code => self.code,
            Category::Analysis => self.analysis,
        }
    }

    pub fn mark_filled(&mut self, category: Category) {
        match category {
            Category::Design => self.design = true,
            Category::Code => self.code = true,
            Category::Analysis => self.analysis = true,
        }
    }

    pub fn all_filled(&self) -> bool {
        Category::ALL.iter().all(|c| self.is_filled(*c))
    }

    pub fn unfilled(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.is_filled(*c))
            .collect()
    }
}

/// Locates, erases and fills the placeholder cell of every category.
///
/// Cells are visited in table, row, cell order. A cell matching an unfilled
/// category has its keyword paragraphs cleared and the category's content
/// appended; the category is then closed and the cell is not considered for
/// any other category.
pub fn fill_placeholders(
    document: &mut Document,
    content: &GeneratedContent,
    config: &FillConfig,
) -> Result<FillStatus, DocxError> {
    let code_classifier = LineClassifier::code()?;
    let plain_classifier = LineClassifier::plain();
    let mut status = FillStatus::default();

    for mut cell in document.cells_mut() {
        if status.all_filled() {
            break;
        }
        let cell_text: String = cell.paragraph_texts().concat();

        let matched = config.keywords.entries().iter().find(|entry| {
            !status.is_filled(entry.category)
                && entry
                    .keywords
                    .iter()
                    .any(|keyword| cell_text.contains(keyword.as_str()))
        });
        let Some(entry) = matched else { continue };

        let cleared = cell.clear_paragraphs_containing(&entry.keywords);
        let classifier = match entry.category {
            Category::Code => &code_classifier,
            Category::Design | Category::Analysis => &plain_classifier,
        };
        let written = write_content(
            &mut cell,
            content.section(entry.category),
            classifier,
            &config.styles,
            &config.layout,
        );
        status.mark_filled(entry.category);

        info!(
            "Filled '{}' placeholder: cleared {} paragraph(s), wrote {} paragraph(s).",
            entry.category, cleared, written
        );
        debug!(cell_text = %cell_text, "Matched placeholder cell");
    }

    Ok(status)
}
