//! # `docfill-cli` Library Crate
//!
//! Command handling for the `docfill` binary: extracting a template's question
//! text and filling a template with AI-generated report sections.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use docfill::{
    constants::output_file_name, parse_ai_response, providers::factory::create_provider,
    types::DEFAULT_REQUEST_TIMEOUT, Category, GeneratedContent, ProviderConfig, ProviderKind,
    ReportClientBuilder,
};
use docfill_docx::{extract_transcript, fill_template, generate_report, FillConfig, FillStatus};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the question text extracted from a .docx template
    Extract(ExtractArgs),
    /// Generate the report sections and write a filled copy of the template
    Fill(FillArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Path to the .docx template.
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct FillArgs {
    /// Path to the .docx template.
    pub file: PathBuf,
    /// AI provider: dashscope (Qwen) or deepseek.
    #[arg(long, default_value = "dashscope")]
    pub provider: ProviderKind,
    /// Model name. Defaults to the provider's recommended model.
    #[arg(long)]
    pub model: Option<String>,
    /// API key for the selected provider.
    #[arg(long, env = "DOCFILL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Override the provider endpoint.
    #[arg(long, env = "DOCFILL_API_URL")]
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
    /// Use a saved AI response instead of calling a provider.
    #[arg(long, conflicts_with_all = ["model", "api_url"])]
    pub response_file: Option<PathBuf>,
    /// YAML file overriding keywords, styles and layout.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output path. Defaults to `Done_<name>` next to the template.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

// --- Main Application Logic ---

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract(args) => handle_extract(&args),
        Commands::Fill(args) => handle_fill(&args).await,
    }
}

fn read_template(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read template {}", path.display()))
}

fn handle_extract(args: &ExtractArgs) -> Result<()> {
    let template = read_template(&args.file)?;
    let transcript = extract_transcript(&template)?;
    println!("{transcript}");
    println!("--- {} characters ---", transcript.chars().count());
    Ok(())
}

async fn handle_fill(args: &FillArgs) -> Result<()> {
    let template = read_template(&args.file)?;
    let config = match &args.config {
        Some(path) => FillConfig::from_path(path)?,
        None => FillConfig::default(),
    };

    let (bytes, status, content) = match &args.response_file {
        Some(path) => {
            info!("Using saved AI response from {}", path.display());
            let response = fs::read_to_string(path)
                .with_context(|| format!("Failed to read response file {}", path.display()))?;
            let content = parse_ai_response(&response)?;
            let filled = fill_template(&template, &content, &config)?;
            (filled.bytes, filled.status, content)
        }
        None => {
            let api_key = args
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| anyhow!("An API key is required: pass --api-key or set DOCFILL_API_KEY"))?;
            let provider_config = ProviderConfig {
                model: args.model.clone(),
                api_url: args.api_url.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
                ..ProviderConfig::new(args.provider, api_key)
            };
            let client = ReportClientBuilder::new()
                .ai_provider(create_provider(&provider_config)?)
                .build()?;
            let report = generate_report(&template, &client, &config).await?;
            (report.bytes, report.status, report.content)
        }
    };

    let output = output_path(&args.file, args.output.as_deref())?;
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_summary(&output, &status, &content);
    Ok(())
}

/// The explicit output path, or `Done_<name>` beside the template.
pub fn output_path(template: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let Some(name) = template.file_name().and_then(|n| n.to_str()) else {
        bail!("Template path {} has no file name", template.display());
    };
    Ok(template.with_file_name(output_file_name(name)))
}

fn print_summary(output: &Path, status: &FillStatus, content: &GeneratedContent) {
    println!("Wrote {}", output.display());
    for category in Category::ALL {
        let mark = if status.is_filled(category) {
            "filled"
        } else {
            "no placeholder found"
        };
        println!("  {category}: {mark}");
    }
    println!("--- code ---");
    println!("{}", content.code);
}
