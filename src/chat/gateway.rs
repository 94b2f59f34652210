use super::{ChatError, ChatGateway, Role, Turn};
use crate::config::ChatConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calls an OpenAI-compatible chat completions API directly.
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: ChatConfig,
    api_key: Option<String>,
}

/// Posts the transcript to a relay that adds the persona server-side.
pub struct RelayGateway {
    client: reqwest::Client,
    url: String,
}

/// Gateway picked from configuration
pub enum Gateway {
    OpenAi(OpenAiGateway),
    Relay(RelayGateway),
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    presence_penalty: f64,
    frequency_penalty: f64,
}

#[derive(Debug, Serialize, PartialEq)]
struct WireMessage<'a> {
    role: &'static str,
    content: std::borrow::Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    message: Option<String>,
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("glowgallery/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn error_status(response: reqwest::Response) -> ChatError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ChatError::Status { status, body }
}

impl OpenAiGateway {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: client(),
            config,
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }

    #[cfg(test)]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Persona first, then the transcript with user turns marked as prompts.
    fn request_body<'a>(&'a self, turns: &'a [Turn]) -> CompletionRequest<'a> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: self.config.persona.as_str().into(),
        });
        messages.extend(turns.iter().map(|turn| match turn.role {
            Role::User => WireMessage {
                role: "user",
                content: format!("Prompt: {}", turn.content).into(),
            },
            Role::Assistant => WireMessage {
                role: "assistant",
                content: turn.content.as_str().into(),
            },
        }));

        CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            presence_penalty: self.config.presence_penalty,
            frequency_penalty: self.config.frequency_penalty,
        }
    }
}

impl ChatGateway for OpenAiGateway {
    async fn reply(&self, turns: &[Turn]) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!(%url, model = %self.config.model, turns = turns.len(), "chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(turns))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyReply)
    }
}

impl RelayGateway {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: client(),
            url: url.into(),
        }
    }
}

impl ChatGateway for RelayGateway {
    async fn reply(&self, turns: &[Turn]) -> Result<String, ChatError> {
        debug!(url = %self.url, turns = turns.len(), "chat relay");

        let response = self
            .client
            .post(&self.url)
            .json(&RelayRequest { messages: turns })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        let reply: RelayReply = response.json().await?;
        reply.message.ok_or(ChatError::EmptyReply)
    }
}

impl Gateway {
    pub fn from_config(config: &ChatConfig) -> Self {
        match &config.relay_url {
            Some(url) => Gateway::Relay(RelayGateway::new(url.clone())),
            None => Gateway::OpenAi(OpenAiGateway::new(config.clone())),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Gateway::OpenAi(gateway) => format!("{} ({})", gateway.config.base_url, gateway.config.model),
            Gateway::Relay(gateway) => gateway.url.clone(),
        }
    }
}

impl ChatGateway for Gateway {
    async fn reply(&self, turns: &[Turn]) -> Result<String, ChatError> {
        match self {
            Gateway::OpenAi(gateway) => gateway.reply(turns).await,
            Gateway::Relay(gateway) => gateway.reply(turns).await,
        }
    }
}
