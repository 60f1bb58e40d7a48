//! Error types for the chat client and the roleplay session.

use std::io;

use thiserror::Error;

/// Result type for chat service calls.
pub type ChatResult<T> = Result<T, ChatError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures talking to the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key was configured.
    #[error("no API key configured (set ROLEPLAY_CHATGPT_KEY or pass --api-key)")]
    MissingApiKey,

    /// The request never got a response.
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("chat service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// The response body was not a chat completion.
    #[error("malformed chat response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The completion had no choices or no content.
    #[error("chat service returned no content")]
    EmptyResponse,
}

/// Failures that end a roleplay session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persisting or creating the character failed.
    #[error("{0}")]
    Character(#[from] ts_core::CoreError),

    /// The chat service failed.
    #[error("{0}")]
    Chat(#[from] ChatError),

    /// Reading from the console failed.
    #[error("console error: {0}")]
    Console(#[from] io::Error),

    /// The console closed before a required answer.
    #[error("input closed")]
    InputClosed,
}
