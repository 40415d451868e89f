//! # Template Filling Tests
//!
//! Builds small templates in memory, fills them and reloads the result to
//! check which cells changed and how the new paragraphs are formatted.

use anyhow::Result;
use docfill::{Category, GeneratedContent};
use docfill_docx::{
    document::DOCUMENT_PART, extract_transcript, fill_template, Document, DocxError, FillConfig,
};
use docfill_test_utils::{read_entry, DocxFixture};

fn sample_content() -> GeneratedContent {
    GeneratedContent {
        design: "设计思路第一行\n\n设计思路第二行".to_string(),
        code: "（1）查询所有学生\n  SELECT * FROM Students;  \n该语句返回全部记录".to_string(),
        analysis: "本次实验加深了对 SQL 的理解。".to_string(),
    }
}

/// Paragraph texts of every cell, as `[row][cell][paragraph]` of the first table.
fn cell_paragraphs(bytes: &[u8]) -> Result<Vec<Vec<Vec<String>>>> {
    let document = Document::from_bytes(bytes)?;
    let table = document
        .tables()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no table"))?;
    Ok(table
        .rows()
        .map(|row| {
            row.cells()
                .map(|cell| cell.paragraphs().map(|p| p.text()).collect())
                .collect()
        })
        .collect())
}

fn lab_template() -> Result<Vec<u8>> {
    DocxFixture::new()
        .paragraph("实验报告")
        .table(&[
            &[&["一、实验内容"], &["请撰写上述内容的基本语法"]],
            &[&["二、实验代码"], &["运行代码截图或直接粘贴过来"]],
            &[&["三、实验总结"], &["实验心得与体会"]],
        ])
        .build()
}

#[test]
fn test_fill_all_three_sections() -> Result<()> {
    // Arrange
    let template = lab_template()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    assert!(filled.status.all_filled());
    assert!(filled.status.unfilled().is_empty());

    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0], vec!["一、实验内容"]);
    assert_eq!(cells[0][1], vec!["", "设计思路第一行", "设计思路第二行"]);
    assert_eq!(cells[1][0], vec!["二、实验代码"]);
    assert_eq!(
        cells[1][1],
        vec!["", "（1）查询所有学生", "SELECT * FROM Students;", "该语句返回全部记录"]
    );
    assert_eq!(cells[2][1], vec!["", "本次实验加深了对 SQL 的理解。"]);
    Ok(())
}

#[test]
fn test_code_lines_are_styled_by_kind() -> Result<()> {
    // Arrange
    let template = lab_template()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    let document = Document::from_bytes(&filled.bytes)?;
    let table = document.tables().next().unwrap();
    let code_cell = table.rows().nth(1).unwrap().cells().nth(1).unwrap();
    let paragraphs: Vec<_> = code_cell.paragraphs().collect();
    assert_eq!(paragraphs.len(), 4);

    let heading = paragraphs[1];
    let run = heading.runs().next().unwrap();
    assert!(run.is_bold());
    assert_eq!(run.latin_font(), Some("Times New Roman"));
    assert_eq!(run.east_asian_font(), Some("宋体"));
    assert_eq!(run.color(), Some("00008B"));
    assert_eq!(run.size_half_points(), Some(24));
    assert_eq!(heading.shading(), None);

    let code = paragraphs[2];
    let run = code.runs().next().unwrap();
    assert!(!run.is_bold());
    assert_eq!(run.latin_font(), Some("Courier New"));
    assert_eq!(run.color(), Some("323232"));
    assert_eq!(run.size_half_points(), Some(21));
    assert_eq!(code.shading(), Some("F2F2F2"));

    let body = paragraphs[3];
    let run = body.runs().next().unwrap();
    assert!(!run.is_bold());
    assert_eq!(run.latin_font(), Some("Times New Roman"));
    assert_eq!(run.size_half_points(), Some(24));
    assert_eq!(body.shading(), None);

    for paragraph in &paragraphs[1..] {
        assert_eq!(paragraph.space_before_twips(), Some(80));
        assert_eq!(paragraph.line_spacing_240ths(), Some(300));
    }
    Ok(())
}

#[test]
fn test_statement_keywords_are_body_outside_code_section() -> Result<()> {
    // Arrange
    let template = lab_template()?;
    let content = GeneratedContent {
        design: "(1) 使用 SELECT 语句;".to_string(),
        ..sample_content()
    };

    // Act
    let filled = fill_template(&template, &content, &FillConfig::default())?;

    // Assert
    let document = Document::from_bytes(&filled.bytes)?;
    let table = document.tables().next().unwrap();
    let design_cell = table.rows().next().unwrap().cells().nth(1).unwrap();
    let paragraph = design_cell.paragraphs().nth(1).unwrap();
    let run = paragraph.runs().next().unwrap();
    assert!(!run.is_bold());
    assert_eq!(run.latin_font(), Some("Times New Roman"));
    assert_eq!(paragraph.shading(), None);
    Ok(())
}

#[test]
fn test_only_first_matching_cell_is_filled() -> Result<()> {
    // Arrange
    let template = DocxFixture::new()
        .table(&[
            &[&["请将运行代码粘贴在此"]],
            &[&["附加：运行代码截图"]],
        ])
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    assert!(filled.status.code);
    assert!(!filled.status.design);
    assert!(!filled.status.analysis);
    assert_eq!(
        filled.status.unfilled(),
        vec![Category::Design, Category::Analysis]
    );

    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0].len(), 4);
    assert_eq!(cells[0][0][0], "");
    assert_eq!(cells[1][0], vec!["附加：运行代码截图"]);
    Ok(())
}

#[test]
fn test_heading_sharing_placeholder_cell_survives() -> Result<()> {
    // Arrange
    let template = DocxFixture::new()
        .table(&[&[&[
            "三、实验代码",
            "要求：运行代码直接粘贴过来，格式为等宽字体",
        ]]])
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0][0], "三、实验代码");
    assert_eq!(cells[0][0][1], "");
    assert_eq!(cells[0][0][2], "（1）查询所有学生");
    Ok(())
}

#[test]
fn test_cell_matching_two_categories_goes_to_earliest() -> Result<()> {
    // Arrange
    // Contains a code keyword and an analysis keyword.
    let template = DocxFixture::new()
        .table(&[&[&["运行代码截图"], &["心得"]], &[&["截图与心得"]]])
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0][1], "（1）查询所有学生");
    assert_eq!(cells[0][1][1], "本次实验加深了对 SQL 的理解。");
    // Code and analysis are both closed, so the last cell is untouched.
    assert_eq!(cells[1][0], vec!["截图与心得"]);
    Ok(())
}

#[test]
fn test_document_without_tables_is_unchanged() -> Result<()> {
    // Arrange
    let template = DocxFixture::new()
        .paragraph("请将运行代码直接粘贴过来")
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    assert_eq!(
        filled.status.unfilled(),
        vec![Category::Design, Category::Code, Category::Analysis]
    );
    assert_eq!(
        extract_transcript(&filled.bytes)?,
        extract_transcript(&template)?
    );
    Ok(())
}

#[test]
fn test_missing_section_sentinel_is_written() -> Result<()> {
    // Arrange
    let template = lab_template()?;
    let content = docfill::parse_ai_response("<design>只有设计</design>")?;

    // Act
    let filled = fill_template(&template, &content, &FillConfig::default())?;

    // Assert
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[1][1], vec!["", "AI生成格式缺失(Code)"]);
    assert_eq!(cells[2][1], vec!["", "AI生成格式缺失(Analysis)"]);
    Ok(())
}

#[test]
fn test_other_package_entries_are_preserved() -> Result<()> {
    // Arrange
    let styles = br#"<?xml version="1.0"?><w:styles xmlns:w="urn:w"><w:style w:styleId="Normal"/></w:styles>"#;
    let template = DocxFixture::new()
        .table(&[&[&["运行代码"]]])
        .entry("word/styles.xml", styles)
        .entry("word/media/image1.png", &[0x89, 0x50, 0x4E, 0x47, 0, 1, 2, 3])
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    assert_eq!(read_entry(&filled.bytes, "word/styles.xml")?, styles.to_vec());
    assert_eq!(
        read_entry(&filled.bytes, "word/media/image1.png")?,
        vec![0x89, 0x50, 0x4E, 0x47, 0, 1, 2, 3]
    );
    assert_eq!(
        read_entry(&filled.bytes, "_rels/.rels")?,
        read_entry(&template, "_rels/.rels")?
    );
    assert_ne!(
        read_entry(&filled.bytes, DOCUMENT_PART)?,
        read_entry(&template, DOCUMENT_PART)?
    );
    Ok(())
}

#[test]
fn test_fill_leaves_template_bytes_reusable() -> Result<()> {
    // Arrange
    let template = lab_template()?;
    let before = template.clone();

    // Act
    let first = fill_template(&template, &sample_content(), &FillConfig::default())?;
    let second = fill_template(&template, &sample_content(), &FillConfig::default())?;

    // Assert
    assert_eq!(template, before);
    assert_eq!(cell_paragraphs(&first.bytes)?, cell_paragraphs(&second.bytes)?);
    Ok(())
}

#[test]
fn test_fill_rejects_corrupt_package() {
    // Act
    let result = fill_template(b"PK\x03\x04 truncated", &sample_content(), &FillConfig::default());

    // Assert
    assert!(result.is_err());
}

#[test]
fn test_fill_rejects_package_without_document_part() -> Result<()> {
    // Arrange
    let fixture = DocxFixture::new().build()?;
    let package = {
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", SimpleFileOptions::default())?;
        writer.write_all(&read_entry(&fixture, "_rels/.rels")?)?;
        writer.finish()?.into_inner()
    };

    // Act
    let result = fill_template(&package, &sample_content(), &FillConfig::default());

    // Assert
    assert!(matches!(result, Err(DocxError::Malformed(_))));
    Ok(())
}

#[test]
fn test_yaml_config_overrides_keywords_and_styles() -> Result<()> {
    // Arrange
    let config = FillConfig::from_yaml_str(
        r#"
keywords:
  - category: code
    keywords: ["CODE_HERE"]
styles:
  code:
    latin_font: Consolas
    size_pt: 11
    color: "000000"
    shading: "EEEEEE"
layout:
  space_before_pt: 6
  line_spacing: 1.5
"#,
    )?;
    let template = DocxFixture::new()
        .table(&[&[&["运行代码"], &["CODE_HERE"]]])
        .build()?;

    // Act
    let filled = fill_template(&template, &sample_content(), &config)?;

    // Assert
    assert_eq!(
        filled.status.unfilled(),
        vec![Category::Design, Category::Analysis]
    );
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0], vec!["运行代码"]);

    let document = Document::from_bytes(&filled.bytes)?;
    let table = document.tables().next().unwrap();
    let cell = table.rows().next().unwrap().cells().nth(1).unwrap();
    let code = cell.paragraphs().nth(2).unwrap();
    let run = code.runs().next().unwrap();
    assert_eq!(run.latin_font(), Some("Consolas"));
    assert_eq!(run.size_half_points(), Some(22));
    assert_eq!(code.shading(), Some("EEEEEE"));
    assert_eq!(code.space_before_twips(), Some(120));
    assert_eq!(code.line_spacing_240ths(), Some(360));

    let heading = cell.paragraphs().nth(1).unwrap();
    assert!(heading.runs().next().unwrap().is_bold());
    assert_eq!(
        heading.runs().next().unwrap().latin_font(),
        Some("Times New Roman")
    );
    Ok(())
}

#[test]
fn test_yaml_config_rejects_invalid_values() {
    let bad_color = FillConfig::from_yaml_str("styles:\n  body:\n    latin_font: Arial\n    size_pt: 12\n    color: blue\n");
    assert!(matches!(bad_color, Err(DocxError::Config(_))));

    let empty_keyword =
        FillConfig::from_yaml_str("keywords:\n  - category: design\n    keywords: [\"\"]\n");
    assert!(matches!(empty_keyword, Err(DocxError::Config(_))));

    let unknown_category =
        FillConfig::from_yaml_str("keywords:\n  - category: summary\n    keywords: [x]\n");
    assert!(matches!(unknown_category, Err(DocxError::Config(_))));
}

#[test]
fn test_lab_report_scenario() -> Result<()> {
    // Arrange
    let template = DocxFixture::new()
        .table(&[
            &[&["实验目的"], &["掌握基本语法"]],
            &[&["实验过程"], &["运行代码"]],
            &[&["实验小结"], &["心得"]],
        ])
        .build()?;
    let content = docfill::parse_ai_response(
        "<design>用SQL实现查询</design><code>(1) 题目\nSELECT * FROM T;</code><analysis>总结完毕</analysis>",
    )?;

    // Act
    let filled = fill_template(&template, &content, &FillConfig::default())?;

    // Assert
    assert!(filled.status.all_filled());
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][1], vec!["", "用SQL实现查询"]);
    assert_eq!(cells[1][1], vec!["", "(1) 题目", "SELECT * FROM T;"]);
    assert_eq!(cells[2][1], vec!["", "总结完毕"]);

    let document = Document::from_bytes(&filled.bytes)?;
    let table = document.tables().next().unwrap();
    let code_cell = table.rows().nth(1).unwrap().cells().nth(1).unwrap();
    let paragraphs: Vec<_> = code_cell.paragraphs().collect();
    assert!(paragraphs[1].runs().next().unwrap().is_bold());
    assert_eq!(paragraphs[1].shading(), None);
    assert_eq!(paragraphs[2].shading(), Some("F2F2F2"));
    assert_eq!(
        paragraphs[2].runs().next().unwrap().latin_font(),
        Some("Courier New")
    );
    Ok(())
}

#[test]
fn test_control_characters_are_stripped_from_output() -> Result<()> {
    // Arrange
    let template = DocxFixture::new().table(&[&[&["运行代码"]]]).build()?;
    let content = GeneratedContent {
        code: "SELECT 1;\u{1b}[0m\u{0}\n\u{7}\u{1b}".to_string(),
        ..sample_content()
    };

    // Act
    let filled = fill_template(&template, &content, &FillConfig::default())?;

    // Assert
    let document_xml = read_entry(&filled.bytes, DOCUMENT_PART)?;
    assert!(!document_xml
        .iter()
        .any(|b| *b < 0x20 && !matches!(*b, b'\t' | b'\n' | b'\r')));
    let cells = cell_paragraphs(&filled.bytes)?;
    assert_eq!(cells[0][0], vec!["", "SELECT 1;[0m"]);
    Ok(())
}

#[test]
fn test_yaml_config_rejects_negative_spacing() {
    let negative = FillConfig::from_yaml_str("layout:\n  space_before_pt: -2\n");
    assert!(matches!(negative, Err(DocxError::Config(_))));

    let zero = FillConfig::from_yaml_str("layout:\n  space_before_pt: 0\n");
    assert!(zero.is_ok());
}
