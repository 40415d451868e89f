use crate::errors::PromptError;
use crate::providers::ai::AiProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One of the three sections a report template and an AI response are organized around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Design,
    Code,
    Analysis,
}

impl Category {
    /// All categories, in the order they appear in a generated response.
    pub const ALL: [Category; 3] = [Category::Design, Category::Code, Category::Analysis];

    /// The tag name used for this category in the AI response (`<design>` etc.).
    pub fn tag(self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Code => "code",
            Category::Analysis => "analysis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The three text blocks produced by one successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub design: String,
    pub code: String,
    pub analysis: String,
}

impl GeneratedContent {
    /// Returns the block belonging to `category`.
    pub fn section(&self, category: Category) -> &str {
        match category {
            Category::Design => &self.design,
            Category::Code => &self.code,
            Category::Analysis => &self.analysis,
        }
    }
}

/// Selects which AI backend handles a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Alibaba Cloud DashScope (Qwen models).
    #[default]
    DashScope,
    /// DeepSeek, an OpenAI-compatible chat completion API.
    DeepSeek,
}

impl ProviderKind {
    /// The model used when the caller does not pick one.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::DashScope => "qwen-plus",
            ProviderKind::DeepSeek => "deepseek-chat",
        }
    }

    /// Models offered for this provider, recommended one first.
    pub fn available_models(self) -> &'static [&'static str] {
        match self {
            ProviderKind::DashScope => &["qwen-plus", "qwen-turbo", "qwen-max"],
            ProviderKind::DeepSeek => &["deepseek-chat"],
        }
    }

    /// The endpoint used when no override URL is configured.
    pub fn default_api_url(self) -> &'static str {
        match self {
            ProviderKind::DashScope => {
                "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation"
            }
            ProviderKind::DeepSeek => "https://api.deepseek.com/chat/completions",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashscope" | "qwen" | "aliyun" => Ok(ProviderKind::DashScope),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(PromptError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::DashScope => f.write_str("dashscope"),
            ProviderKind::DeepSeek => f.write_str("deepseek"),
        }
    }
}

/// Everything needed to instantiate a provider for a single request.
///
/// Provider choice, model and API key are supplied per request by the caller;
/// nothing here is read from process-wide state.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    /// Falls back to [`ProviderKind::default_model`] when `None`.
    pub model: Option<String>,
    /// Falls back to [`ProviderKind::default_api_url`] when `None`.
    pub api_url: Option<String>,
    pub timeout: Duration,
}

/// The request timeout applied to every provider unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

impl ProviderConfig {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            model: None,
            api_url: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_url())
    }
}

/// A client that turns a document transcript into [`GeneratedContent`].
pub struct ReportClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) prompt_template: String,
}

impl fmt::Debug for ReportClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportClient")
            .field("ai_provider", &self.ai_provider)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `ReportClient` instances.
#[derive(Default)]
pub struct ReportClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    prompt_template: Option<String>,
}

impl ReportClientBuilder {
    /// Creates a new `ReportClientBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use docfill::ReportClientBuilder;
    ///
    /// let builder = ReportClientBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Overrides the report prompt. The template must contain a `{context}` placeholder.
    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = Some(template.into());
        self
    }

    /// Builds the `ReportClient`.
    ///
    /// Fails with [`PromptError::MissingAiProvider`] if no provider was set.
    pub fn build(self) -> Result<ReportClient, PromptError> {
        let ai_provider = self.ai_provider.ok_or(PromptError::MissingAiProvider)?;
        Ok(ReportClient {
            ai_provider,
            prompt_template: self
                .prompt_template
                .unwrap_or_else(|| crate::prompts::report::REPORT_PROMPT_TEMPLATE.to_string()),
        })
    }
}
