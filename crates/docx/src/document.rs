//! # Document Package Model
//!
//! A `.docx` file is a zip package; the body lives in `word/document.xml`.
//! [`Document`] owns the parsed body tree together with the pristine package
//! bytes, so saving only replaces the body part and copies every other entry
//! byte for byte.
//!
//! Tables, rows, cells, paragraphs and runs are typed views over the tree. Only
//! direct children are considered at each level, so a table nested inside a
//! cell is not itself one of the document's tables.

use crate::errors::DocxError;
use crate::xml::{XmlDocument, XmlElement, XmlNode};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// The package part holding the document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

pub(crate) const BODY: &str = "w:body";
pub(crate) const TABLE: &str = "w:tbl";
pub(crate) const ROW: &str = "w:tr";
pub(crate) const CELL: &str = "w:tc";
pub(crate) const PARAGRAPH: &str = "w:p";
pub(crate) const PARAGRAPH_PROPS: &str = "w:pPr";
pub(crate) const RUN: &str = "w:r";
pub(crate) const RUN_PROPS: &str = "w:rPr";
pub(crate) const TEXT: &str = "w:t";

/// An in-memory word-processing document.
#[derive(Debug, Clone)]
pub struct Document {
    source: Vec<u8>,
    xml: XmlDocument,
}

impl Document {
    /// Loads a document from the bytes of a `.docx` package.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut raw = Vec::new();
        {
            let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
                zip::result::ZipError::FileNotFound => {
                    DocxError::Malformed(format!("package has no {DOCUMENT_PART}"))
                }
                other => DocxError::Zip(other),
            })?;
            part.read_to_end(&mut raw)?;
        }

        let xml = XmlDocument::parse(&raw)?;
        if xml.root.child(BODY).is_none() {
            return Err(DocxError::Malformed(format!(
                "{DOCUMENT_PART} has no {BODY} element"
            )));
        }

        Ok(Self {
            source: bytes.to_vec(),
            xml,
        })
    }

    /// Reads and loads a `.docx` file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocxError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    fn body(&self) -> Option<&XmlElement> {
        self.xml.root.child(BODY)
    }

    /// Top-level tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = Table<'_>> {
        self.body()
            .into_iter()
            .flat_map(|body| body.children_named(TABLE))
            .map(Table)
    }

    /// Top-level paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'_>> {
        self.body()
            .into_iter()
            .flat_map(|body| body.children_named(PARAGRAPH))
            .map(Paragraph)
    }

    /// Every cell of every top-level table, in table, row, cell order.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = CellMut<'_>> {
        self.xml
            .root
            .child_mut(BODY)
            .into_iter()
            .flat_map(|body| body.children_named_mut(TABLE))
            .flat_map(|table| table.children_named_mut(ROW))
            .flat_map(|row| row.children_named_mut(CELL))
            .map(CellMut)
    }

    /// Serializes the document into a new `.docx` package.
    ///
    /// Every package entry except the body part is copied raw from the source.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let document_xml = self.xml.to_bytes()?;
        let mut archive = ZipArchive::new(Cursor::new(self.source.as_slice()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if entry.name() == DOCUMENT_PART {
                drop(entry);
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                writer.start_file(DOCUMENT_PART, options)?;
                writer.write_all(&document_xml)?;
            } else {
                writer.raw_copy_file(entry)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// A table view.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a>(&'a XmlElement);

impl<'a> Table<'a> {
    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> {
        self.0.children_named(ROW).map(Row)
    }
}

/// A table row view.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a>(&'a XmlElement);

impl<'a> Row<'a> {
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> {
        self.0.children_named(CELL).map(Cell)
    }
}

/// A table cell view.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a>(&'a XmlElement);

impl<'a> Cell<'a> {
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'a>> {
        self.0.children_named(PARAGRAPH).map(Paragraph)
    }

    /// The cell's paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Mutable access to a table cell.
///
/// Existing paragraphs can be emptied but never removed or reordered; new
/// paragraphs are only appended.
#[derive(Debug)]
pub struct CellMut<'a>(&'a mut XmlElement);

impl CellMut<'_> {
    /// Paragraph texts of the cell, in order.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.0
            .children_named(PARAGRAPH)
            .map(paragraph_text)
            .collect()
    }

    pub fn as_cell(&self) -> Cell<'_> {
        Cell(&*self.0)
    }

    /// Empties every paragraph whose text contains one of `needles`.
    ///
    /// The paragraph element and its `w:pPr` stay in place. Returns the number
    /// of paragraphs cleared.
    pub fn clear_paragraphs_containing(&mut self, needles: &[String]) -> usize {
        let mut cleared = 0;
        for paragraph in self.0.children_named_mut(PARAGRAPH) {
            let text = paragraph_text(paragraph);
            if needles.iter().any(|needle| text.contains(needle.as_str())) {
                clear_paragraph(paragraph);
                cleared += 1;
            }
        }
        cleared
    }

    /// Appends a paragraph element at the end of the cell.
    pub fn append_paragraph(&mut self, paragraph: XmlElement) {
        self.0.push(paragraph);
    }
}

/// A paragraph view.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a>(&'a XmlElement);

impl<'a> Paragraph<'a> {
    pub fn text(&self) -> String {
        paragraph_text(self.0)
    }

    pub fn runs(&self) -> impl Iterator<Item = Run<'a>> {
        self.0.children_named(RUN).map(Run)
    }

    /// Background fill of the paragraph (`w:pPr/w:shd/@w:fill`).
    pub fn shading(&self) -> Option<&'a str> {
        self.0
            .child(PARAGRAPH_PROPS)
            .and_then(|props| props.child("w:shd"))
            .and_then(|shd| shd.attr("w:fill"))
    }

    /// Space before the paragraph in twentieths of a point.
    pub fn space_before_twips(&self) -> Option<u32> {
        self.spacing_attr("w:before")
    }

    /// Line spacing in 240ths of a line.
    pub fn line_spacing_240ths(&self) -> Option<u32> {
        self.spacing_attr("w:line")
    }

    fn spacing_attr(&self, key: &str) -> Option<u32> {
        self.0
            .child(PARAGRAPH_PROPS)
            .and_then(|props| props.child("w:spacing"))
            .and_then(|spacing| spacing.attr(key))
            .and_then(|v| v.parse().ok())
    }
}

/// A run view exposing the formatting the renderer writes.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a>(&'a XmlElement);

impl<'a> Run<'a> {
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self.0, &mut out);
        out
    }

    fn props(&self) -> Option<&'a XmlElement> {
        self.0.child(RUN_PROPS)
    }

    pub fn is_bold(&self) -> bool {
        self.props()
            .and_then(|props| props.child("w:b"))
            .map(|b| !matches!(b.attr("w:val"), Some("0") | Some("false")))
            .unwrap_or(false)
    }

    pub fn latin_font(&self) -> Option<&'a str> {
        self.fonts().and_then(|fonts| fonts.attr("w:ascii"))
    }

    pub fn east_asian_font(&self) -> Option<&'a str> {
        self.fonts().and_then(|fonts| fonts.attr("w:eastAsia"))
    }

    fn fonts(&self) -> Option<&'a XmlElement> {
        self.props().and_then(|props| props.child("w:rFonts"))
    }

    /// Text color as `RRGGBB`.
    pub fn color(&self) -> Option<&'a str> {
        self.props()
            .and_then(|props| props.child("w:color"))
            .and_then(|color| color.attr("w:val"))
    }

    /// Font size in half-points.
    pub fn size_half_points(&self) -> Option<u32> {
        self.props()
            .and_then(|props| props.child("w:sz"))
            .and_then(|sz| sz.attr("w:val"))
            .and_then(|v| v.parse().ok())
    }
}

fn paragraph_text(paragraph: &XmlElement) -> String {
    let mut out = String::new();
    collect_text(paragraph, &mut out);
    out
}

fn collect_text(el: &XmlElement, out: &mut String) {
    for child in el.elements() {
        match child.name.as_str() {
            TEXT => out.push_str(&child.text()),
            "w:tab" => out.push('\t'),
            "w:br" | "w:cr" => out.push('\n'),
            // Text boxes, drawings and their fallbacks are not paragraph text.
            PARAGRAPH_PROPS | RUN_PROPS | "mc:AlternateContent" | "w:drawing" | "w:pict"
            | "w:object" => {}
            _ => collect_text(child, out),
        }
    }
}

/// Drops all inline content of a paragraph, keeping its properties.
fn clear_paragraph(paragraph: &mut XmlElement) {
    paragraph.children.retain(|node| match node {
        XmlNode::Element(el) => el.name == PARAGRAPH_PROPS,
        _ => false,
    });
}
