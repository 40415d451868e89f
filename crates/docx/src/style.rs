//! # Style Profiles
//!
//! Named visual styles applied to rendered lines. A [`StyleSheet`] is built
//! once (defaults or YAML) and passed to the renderer; nothing is read from
//! global state.

use serde::{Deserialize, Serialize};

/// Which profile of the [`StyleSheet`] a line is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// Narrative text.
    Body,
    /// Item-number lines such as `(1) ...`: body face in bold.
    Heading,
    /// Code or query statements: monospace on a shaded background.
    Code,
}

/// Font, size, color and shading for one kind of line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Face for Latin text (`w:ascii` / `w:hAnsi`).
    pub latin_font: String,
    /// Face for CJK text (`w:eastAsia`), if set.
    #[serde(default)]
    pub east_asian_font: Option<String>,
    pub size_pt: f32,
    /// Text color as `RRGGBB`.
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    /// Paragraph background as `RRGGBB`.
    #[serde(default)]
    pub shading: Option<String>,
}

impl StyleProfile {
    /// Size in half-points, the unit of `w:sz`.
    pub fn size_half_points(&self) -> u32 {
        (self.size_pt * 2.0).round() as u32
    }
}

/// The three profiles used by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub body: StyleProfile,
    pub heading: StyleProfile,
    pub code: StyleProfile,
}

impl StyleSheet {
    pub fn profile(&self, kind: StyleKind) -> &StyleProfile {
        match kind {
            StyleKind::Body => &self.body,
            StyleKind::Heading => &self.heading,
            StyleKind::Code => &self.code,
        }
    }

    fn profiles(&self) -> [(&'static str, &StyleProfile); 3] {
        [
            ("body", &self.body),
            ("heading", &self.heading),
            ("code", &self.code),
        ]
    }

    /// Checks that every color is a six-digit hex value.
    pub fn validate(&self) -> Result<(), String> {
        for (name, profile) in self.profiles() {
            if !is_hex_color(&profile.color) {
                return Err(format!("{name}.color '{}' is not RRGGBB", profile.color));
            }
            if let Some(shading) = &profile.shading {
                if !is_hex_color(shading) {
                    return Err(format!("{name}.shading '{shading}' is not RRGGBB"));
                }
            }
            if profile.size_pt.is_nan() || profile.size_pt <= 0.0 {
                return Err(format!("{name}.size_pt must be positive"));
            }
        }
        Ok(())
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let body = StyleProfile {
            latin_font: "Times New Roman".to_string(),
            east_asian_font: Some("宋体".to_string()),
            size_pt: 12.0,
            color: "00008B".to_string(),
            bold: false,
            shading: None,
        };
        let heading = StyleProfile {
            bold: true,
            ..body.clone()
        };
        let code = StyleProfile {
            latin_font: "Courier New".to_string(),
            east_asian_font: None,
            size_pt: 10.5,
            color: "323232".to_string(),
            bold: false,
            shading: Some("F2F2F2".to_string()),
        };
        Self {
            body,
            heading,
            code,
        }
    }
}

/// Spacing applied to every rendered paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphLayout {
    pub space_before_pt: f32,
    /// Multiple of single line spacing.
    pub line_spacing: f32,
}

impl ParagraphLayout {
    /// `w:spacing/@w:before`, in twentieths of a point.
    pub fn space_before_twips(&self) -> u32 {
        (self.space_before_pt * 20.0).round() as u32
    }

    /// `w:spacing/@w:line` with `lineRule="auto"`, in 240ths of a line.
    pub fn line_240ths(&self) -> u32 {
        (self.line_spacing * 240.0).round() as u32
    }
}

impl Default for ParagraphLayout {
    fn default() -> Self {
        Self {
            space_before_pt: 4.0,
            line_spacing: 1.25,
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}
