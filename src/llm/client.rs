use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponse, CreateResponseArgs, InputMessage, InputRole, OutputItem, OutputMessageContent,
    },
};
use async_trait::async_trait;
use thiserror::Error;

use super::key::{API_KEY_ENV, ApiKey};
use super::prompt::SYSTEM_PROMPT;

const MAX_OUTPUT_TOKENS: u32 = 8000;

/// Text-in/text-out access to a language model.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No OpenAI API key configured. Set {API_KEY_ENV} or pass --api-key.")]
    MissingApiKey,

    #[error("No text output returned from model")]
    EmptyOutput,
}

#[derive(Clone, Debug)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub api_base: Option<String>,
    pub api_key: Option<ApiKey>,
}

impl ModelSettings {
    fn request(&self, user_prompt: &str) -> Result<CreateResponse> {
        let message = |role, text: &str| InputMessage {
            role,
            content: vec![text.into()],
            status: None,
        };

        let request = CreateResponseArgs::default()
            .model(self.model.as_str())
            .temperature(self.temperature)
            .max_output_tokens(MAX_OUTPUT_TOKENS)
            .input(vec![
                message(InputRole::System, SYSTEM_PROMPT),
                message(InputRole::User, user_prompt),
            ])
            .build()
            .context("Failed to build model request")?;
        Ok(request)
    }
}

/// The production model, backed by the OpenAI Responses API.
pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    settings: ModelSettings,
}

impl OpenAiModel {
    /// Fails fast when no key is configured so a server never starts without one.
    pub fn new(settings: ModelSettings) -> Result<Self, ClientError> {
        let key = settings.api_key.as_ref().ok_or(ClientError::MissingApiKey)?;

        let mut config = OpenAIConfig::new().with_api_key(key.expose());
        if let Some(base) = settings.api_base.as_deref() {
            config = config.with_api_base(base);
        }

        tracing::info!(
            model = %settings.model,
            api_base = settings.api_base.as_deref().unwrap_or("default"),
            "configured OpenAI client"
        );
        Ok(Self {
            client: Client::with_config(config),
            settings,
        })
    }

    /// Lists models to check that the key is accepted.
    pub async fn verify(&self) -> Result<()> {
        self.client
            .models()
            .list()
            .await
            .context("Failed to validate API key with OpenAI")?;
        Ok(())
    }
}

#[async_trait]
impl TextModel for OpenAiModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.settings.request(prompt)?;
        let response = self
            .client
            .responses()
            .create(request)
            .await
            .context("Failed to get response from LLM")?;

        match first_output_text(response.output) {
            Some(text) => Ok(text),
            None => bail!(ClientError::EmptyOutput),
        }
    }
}

fn first_output_text(output: Vec<OutputItem>) -> Option<String> {
    output
        .into_iter()
        .filter_map(|item| match item {
            OutputItem::Message(message) => Some(message.content),
            _ => None,
        })
        .flatten()
        .find_map(|content| match content {
            OutputMessageContent::OutputText(text) => {
                let trimmed = text.text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        })
}
