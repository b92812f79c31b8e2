use super::{Credential, types::*};
use crate::{Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Chat-completion capability used by the enhancement pipeline.
///
/// The credential travels with each call; implementations must not cache it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        credential: &Credential,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut http = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: http.build()?,
            base_url: config.base_url,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client_for(&self, credential: &Credential) -> Client<OpenAIConfig> {
        let mut openai_config = OpenAIConfig::new().with_api_key(credential.expose());

        if !self.base_url.is_empty() {
            openai_config = openai_config.with_api_base(&self.base_url);
        }

        // One attempt per submission: an empty backoff window stops the
        // library from retrying rate-limited requests on its own.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Client::with_config(openai_config)
            .with_http_client(self.http.clone())
            .with_backoff(no_retry)
    }
}

fn validate_credential(credential: &Credential) -> Result<()> {
    reqwest::header::HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
        .map(|_| ())
        .map_err(|_| crate::Error::llm("invalid API key format"))
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        credential: &Credential,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages on model {}",
            request.messages.len(),
            self.model
        );

        let mut messages = Vec::new();
        for msg in request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = request.max_tokens {
            request_builder.max_completion_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        // async-openai unwraps the header parse, so reject unusable keys here.
        validate_credential(credential)?;

        let response = self
            .client_for(credential)
            .chat()
            .create(openai_request)
            .await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices: Vec<Choice> = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: choice.message.content.unwrap_or_default(),
                },
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}
