pub mod dashscope;
pub mod deepseek;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// Every backend (vendor SDK endpoint, OpenAI-compatible REST endpoint) normalizes
/// its outcome into the same shape: the generated text, or a [`PromptError`].
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response for a single composed prompt.
    async fn generate(&self, prompt: &str) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
