//! # AI Provider Factory
//!
//! Creates the provider selected by a request's [`ProviderKind`]. Hosts (the CLI,
//! tests, any UI layer) go through here so they all build providers the same way.

use crate::{
    errors::PromptError,
    providers::ai::{dashscope::DashScopeProvider, deepseek::DeepSeekProvider, AiProvider},
    types::{ProviderConfig, ProviderKind},
};
use tracing::info;

/// Instantiates the provider described by `config`.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let api_url = config.api_url().to_string();
    let model = config.model().to_string();
    info!(
        "Configuring {} provider with model '{}' at {}",
        config.kind, model, api_url
    );

    let provider: Box<dyn AiProvider> = match config.kind {
        ProviderKind::DashScope => Box::new(DashScopeProvider::new(
            api_url,
            config.api_key.clone(),
            model,
            config.timeout,
        )?),
        ProviderKind::DeepSeek => Box::new(DeepSeekProvider::new(
            api_url,
            config.api_key.clone(),
            model,
            config.timeout,
        )?),
    };

    Ok(provider)
}
