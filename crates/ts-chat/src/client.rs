//! Blocking client for OpenAI-compatible chat completion endpoints.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::message::ChatMessage;

/// Anything that can turn a conversation into one reply.
pub trait ChatService {
    /// Send `messages` and return the text of the first completion choice.
    fn complete(&mut self, messages: &[ChatMessage]) -> ChatResult<String>;
}

/// Talks to a chat completions endpoint over HTTP, one blocking request per
/// call, with no retries.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    config: ChatConfig,
}

impl OpenAiClient {
    /// Build a client. The API key is only checked when a request is made.
    pub fn new(config: ChatConfig) -> ChatResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

impl ChatService for OpenAiClient {
    fn complete(&mut self, messages: &[ChatMessage]) -> ChatResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ChatError::MissingApiKey)?;

        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            n: 1,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            messages = messages.len(),
            "chat completion request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "chat service error response");
            return Err(api_error(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    n: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the first choice's content out of a completion body.
fn parse_completion(body: &str) -> ChatResult<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ChatError::EmptyResponse)
}

fn api_error(status: u16, body: &str) -> ChatError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no details".to_string()
            } else {
                trimmed.to_string()
            }
        });
    ChatError::Api { status, message }
}
