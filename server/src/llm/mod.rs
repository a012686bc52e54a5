//! LLM — multi-provider adapter for the review service.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` enum dispatches
//! to Anthropic or `OpenAI` based on `LLM_PROVIDER`; everything above it
//! talks to the provider-neutral [`LlmChat`] trait so tests can substitute
//! a mock.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Anthropic or OpenAI.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    default_model: String,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// See [`LlmConfig::from_env`] for the variable set.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let default_model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_mode,
                config.openai_base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, default_model })
    }

    /// The model used when a request does not override it
    /// (e.g. `"claude-sonnet-4-5-20250929"`).
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn chat_inner(
        &self,
        model: &str,
        max_tokens: u32,
        temperature: Option<f32>,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(c) => {
                c.chat(model, max_tokens, temperature, system, messages)
                    .await
            }
            LlmProvider::OpenAi(c) => {
                c.chat(model, max_tokens, temperature, system, messages)
                    .await
            }
        }
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        temperature: Option<f32>,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        self.chat_inner(model, max_tokens, temperature, system, messages)
            .await
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}
