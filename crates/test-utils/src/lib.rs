use anyhow::Result;
use async_trait::async_trait;
use docfill::errors::PromptError;
use docfill::providers::ai::AiProvider;
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    response: Arc<Mutex<Result<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    /// A provider that answers every prompt with `response`.
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(response.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with `PromptError::AiApi(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Err(message.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(PromptError::AiApi)
    }
}

// --- Document Fixtures ---

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

enum Block {
    Paragraph(String),
    Table(Vec<Vec<Vec<String>>>),
}

/// Builds minimal `.docx` packages in memory.
///
/// Cells are given as lists of paragraph strings; an entry containing `\n`
/// still produces a single paragraph.
#[derive(Default)]
pub struct DocxFixture {
    blocks: Vec<Block>,
    extra_entries: Vec<(String, Vec<u8>)>,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level paragraph.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.blocks.push(Block::Paragraph(text.to_string()));
        self
    }

    /// Appends a table; `rows[r][c]` lists the paragraphs of one cell.
    pub fn table(mut self, rows: &[&[&[&str]]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.iter().map(|p| p.to_string()).collect())
                    .collect()
            })
            .collect();
        self.blocks.push(Block::Table(rows));
        self
    }

    /// Adds an arbitrary package entry, e.g. `word/styles.xml`.
    pub fn entry(mut self, name: &str, data: &[u8]) -> Self {
        self.extra_entries.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn document_xml(&self) -> String {
        let mut body = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(text) => body.push_str(&paragraph_xml(text)),
                Block::Table(rows) => {
                    body.push_str("<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>");
                    for row in rows {
                        body.push_str("<w:tr>");
                        for cell in row {
                            body.push_str("<w:tc><w:tcPr><w:tcW w:w=\"4000\" w:type=\"dxa\"/></w:tcPr>");
                            if cell.is_empty() {
                                body.push_str("<w:p/>");
                            }
                            for text in cell {
                                body.push_str(&paragraph_xml(text));
                            }
                            body.push_str("</w:tc>");
                        }
                        body.push_str("</w:tr>");
                    }
                    body.push_str("</w:tbl>");
                }
            }
        }
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"{W_NAMESPACE}\"><w:body>{body}<w:sectPr/></w:body></w:document>"
        )
    }

    pub fn build(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(CONTENT_TYPES.as_bytes())?;
        writer.start_file("_rels/.rels", options)?;
        writer.write_all(ROOT_RELS.as_bytes())?;
        writer.start_file("word/document.xml", options)?;
        writer.write_all(self.document_xml().as_bytes())?;
        for (name, data) in &self.extra_entries {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

fn paragraph_xml(text: &str) -> String {
    if text.is_empty() {
        return "<w:p/>".to_string();
    }
    format!(
        "<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape(text)
    )
}

/// Reads one entry of a zip package, for assertions.
pub fn read_entry(package: &[u8], name: &str) -> Result<Vec<u8>> {
    use std::io::Read;
    let mut archive = zip::ZipArchive::new(Cursor::new(package))?;
    let mut file = archive.by_name(name)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}
