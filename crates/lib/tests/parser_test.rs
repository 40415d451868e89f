//! # Response Parser Tests
//!
//! Verifies section extraction from tagged model output, including the
//! sentinel fallback for missing tags.

use docfill::constants::{
    MISSING_ANALYSIS_SENTINEL, MISSING_CODE_SENTINEL, MISSING_DESIGN_SENTINEL,
};
use docfill::parser::{missing_sentinel, SectionParser};
use docfill::{parse_ai_response, Category};

#[test]
fn test_parse_all_sections_trimmed() {
    let text = "前言\n<design>\n  用SQL实现查询\n</design>\n<code>\n(1) 题目\nSELECT * FROM T;\n\n(2) 题目\nDELETE FROM T;\n</code>\n<analysis>  总结完毕\n</analysis>\n尾注";

    let content = parse_ai_response(text).unwrap();

    assert_eq!(content.design, "用SQL实现查询");
    assert_eq!(
        content.code,
        "(1) 题目\nSELECT * FROM T;\n\n(2) 题目\nDELETE FROM T;"
    );
    assert_eq!(content.analysis, "总结完毕");
}

#[test]
fn test_parse_missing_analysis_uses_sentinel() {
    let text = "<design>设计</design><code>SELECT 1;</code>";

    let content = parse_ai_response(text).unwrap();

    assert_eq!(content.design, "设计");
    assert_eq!(content.code, "SELECT 1;");
    assert_eq!(content.analysis, MISSING_ANALYSIS_SENTINEL);
}

#[test]
fn test_parse_empty_response_uses_all_sentinels() {
    let content = parse_ai_response("the model said nothing useful").unwrap();

    assert_eq!(content.design, MISSING_DESIGN_SENTINEL);
    assert_eq!(content.code, MISSING_CODE_SENTINEL);
    assert_eq!(content.analysis, MISSING_ANALYSIS_SENTINEL);
}

#[test]
fn test_parse_is_non_greedy() {
    let text = "<code>first</code> noise <code>second</code>";

    let content = parse_ai_response(text).unwrap();

    assert_eq!(content.code, "first");
}

#[test]
fn test_parse_tags_are_case_sensitive() {
    let text = "<DESIGN>upper</DESIGN><design>lower</design>";

    let content = parse_ai_response(text).unwrap();

    assert_eq!(content.design, "lower");
}

#[test]
fn test_unterminated_tag_counts_as_missing() {
    let text = "<design>started but never closed";

    let content = SectionParser::new().unwrap().parse(text);

    assert_eq!(content.design, missing_sentinel(Category::Design));
}

#[test]
fn test_sentinels_are_distinct() {
    let sentinels: Vec<&str> = Category::ALL.iter().map(|c| missing_sentinel(*c)).collect();
    assert_ne!(sentinels[0], sentinels[1]);
    assert_ne!(sentinels[1], sentinels[2]);
    assert_ne!(sentinels[0], sentinels[2]);
}
