//! # Content Renderer
//!
//! Turns a block of generated text into styled paragraphs appended to a cell.

use crate::classifier::LineClassifier;
use crate::document::{CellMut, PARAGRAPH, PARAGRAPH_PROPS, RUN, RUN_PROPS, TEXT};
use crate::style::{ParagraphLayout, StyleProfile, StyleSheet};
use crate::xml::XmlElement;
use std::borrow::Cow;

/// Renders `content` into `cell`, one paragraph per non-blank line.
///
/// Lines are trimmed; blank lines produce no paragraph. Existing paragraphs
/// of the cell are left as they are. Returns the number of paragraphs added.
pub fn write_content(
    cell: &mut CellMut<'_>,
    content: &str,
    classifier: &LineClassifier,
    styles: &StyleSheet,
    layout: &ParagraphLayout,
) -> usize {
    let mut written = 0;
    for line in content.lines() {
        let line = xml_safe(line);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let kind = classifier.classify(line);
        cell.append_paragraph(styled_paragraph(line, styles.profile(kind), layout));
        written += 1;
    }
    written
}

/// Drops characters outside the XML 1.0 `Char` production, such as NUL or
/// terminal escape bytes, which would make the package unreadable.
fn xml_safe(line: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
    }
    if line.chars().all(allowed) {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line.chars().filter(|c| allowed(*c)).collect())
    }
}

/// Builds a `w:p` holding `text` in a single run formatted with `profile`.
///
/// Shading, when the profile has one, goes into the paragraph properties
/// ahead of the spacing, then the run is added.
pub fn styled_paragraph(text: &str, profile: &StyleProfile, layout: &ParagraphLayout) -> XmlElement {
    let mut props = XmlElement::new(PARAGRAPH_PROPS);
    if let Some(fill) = &profile.shading {
        props.push(
            XmlElement::new("w:shd")
                .with_attr("w:val", "clear")
                .with_attr("w:color", "auto")
                .with_attr("w:fill", fill.as_str()),
        );
    }
    props.push(
        XmlElement::new("w:spacing")
            .with_attr("w:before", layout.space_before_twips().to_string())
            .with_attr("w:line", layout.line_240ths().to_string())
            .with_attr("w:lineRule", "auto"),
    );

    XmlElement::new(PARAGRAPH)
        .with_child(props)
        .with_child(styled_run(text, profile))
}

fn styled_run(text: &str, profile: &StyleProfile) -> XmlElement {
    let mut fonts = XmlElement::new("w:rFonts")
        .with_attr("w:ascii", profile.latin_font.as_str())
        .with_attr("w:hAnsi", profile.latin_font.as_str());
    if let Some(east_asian) = &profile.east_asian_font {
        fonts.set_attr("w:eastAsia", east_asian.as_str());
    }

    let size = profile.size_half_points().to_string();
    let mut props = XmlElement::new(RUN_PROPS).with_child(fonts);
    if profile.bold {
        props.push(XmlElement::new("w:b"));
        props.push(XmlElement::new("w:bCs"));
    }
    props.push(XmlElement::new("w:color").with_attr("w:val", profile.color.as_str()));
    props.push(XmlElement::new("w:sz").with_attr("w:val", size.as_str()));
    props.push(XmlElement::new("w:szCs").with_attr("w:val", size));

    XmlElement::new(RUN).with_child(props).with_child(
        XmlElement::new(TEXT)
            .with_attr("xml:space", "preserve")
            .with_text(text),
    )
}
