//! Chat completion client and roleplay conversation driver.
//!
//! [`RoleplaySession`] resolves a character through the store, sends a
//! scripted opening, and then runs the turn loop against any
//! [`ChatService`] until the reply signals the end of the story.
//! [`OpenAiClient`] is the HTTP implementation of that service.

/// HTTP client for OpenAI-compatible chat completions.
pub mod client;
/// Client and session configuration.
pub mod config;
/// Detecting the end of a roleplay.
pub mod ending;
/// Error types for the client and the session.
pub mod error;
/// Conversation history and request assembly.
pub mod history;
/// Role-tagged chat messages.
pub mod message;
/// The roleplay conversation driver.
pub mod session;

pub use client::{ChatService, OpenAiClient};
pub use config::{API_KEY_VAR, ChatConfig, SessionConfig};
pub use ending::{END_SENTINEL, is_roleplay_finished};
pub use error::{ChatError, ChatResult, SessionError, SessionResult};
pub use history::{History, HistoryPolicy};
pub use message::{ChatMessage, Role};
pub use session::{Phase, RoleplaySession, SessionOutcome};
