//! Configuration for the chat client and the roleplay session.

use std::time::Duration;

use ts_core::CharacterTemplate;

use crate::ending::is_roleplay_finished;
use crate::history::HistoryPolicy;

/// Environment variable holding the chat service API key.
pub const API_KEY_VAR: &str = "ROLEPLAY_CHATGPT_KEY";

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default system preamble sent with every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a character in an interactive roleplay scenario.";

/// Default first message of every session.
pub const DEFAULT_OPENING: &str = "Begin roleplay";

/// Connection settings for [`OpenAiClient`](crate::OpenAiClient).
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Bearer token. A missing key fails the first request, not startup.
    pub api_key: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl ChatConfig {
    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set or clear the API key. Blank keys count as missing.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Behavior of a [`RoleplaySession`](crate::RoleplaySession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which earlier turns travel with each request.
    pub history: HistoryPolicy,
    /// System preamble prepended to every request.
    pub system_prompt: String,
    /// Scripted message that starts the story.
    pub opening_message: String,
    /// Attributes to ask for when creating a character.
    pub template: CharacterTemplate,
    /// Decides whether a reply ends the session.
    pub finished: fn(&str) -> bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history: HistoryPolicy::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            opening_message: DEFAULT_OPENING.to_string(),
            template: CharacterTemplate::default(),
            finished: is_roleplay_finished,
        }
    }
}

impl SessionConfig {
    /// Set the history policy.
    pub fn with_history(mut self, history: HistoryPolicy) -> Self {
        self.history = history;
        self
    }

    /// Set the character template.
    pub fn with_template(mut self, template: CharacterTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the system preamble.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the opening message.
    pub fn with_opening(mut self, message: impl Into<String>) -> Self {
        self.opening_message = message.into();
        self
    }

    /// Replace the end-of-story predicate.
    pub fn with_finished(mut self, finished: fn(&str) -> bool) -> Self {
        self.finished = finished;
        self
    }
}
