//! # Report Generation Prompts
//!
//! Prompt templates for producing the three report sections from a lab-report
//! template's question text.

/// The full prompt sent to the provider. The transcript is embedded at `{context}`.
///
/// Placeholders: `{context}`
pub const REPORT_PROMPT_TEMPLATE: &str = r#"
你是一名计算机助教。请根据以下实验题目，生成满分实验报告。

【格式要求 (XML)】：
<design>简述实验工具及核心SQL语法。</design>
<code>
(1) [复述题目1]
[SQL 代码]

(2) [复述题目2]
[SQL 代码]
</code>
<analysis>实验总结与心得。</analysis>

【题目内容】：
{context}
"#;

/// The system message sent alongside the prompt to chat-completion providers.
pub const CHAT_SYSTEM_MESSAGE: &str = "你是一个有用的助手。请按 XML 格式输出。";
