use clap::Args;

use ts_chat::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use ts_chat::{
    API_KEY_VAR, ChatConfig, HistoryPolicy, OpenAiClient, RoleplaySession, SessionConfig,
};
use ts_core::CharacterStore;

use super::TemplateArgs;
use crate::console::TerminalConsole;

/// Options for a roleplay session.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Completion model
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat completions endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// API key for the chat service
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Send only the current turn with each request
    #[arg(long)]
    pub no_history: bool,
}

pub fn run(store: CharacterStore, args: PlayArgs) -> Result<(), String> {
    let template = args.template.resolve()?;

    let chat = ChatConfig::default()
        .with_endpoint(args.endpoint)
        .with_model(args.model)
        .with_api_key(args.api_key);
    let client =
        OpenAiClient::new(chat).map_err(|e| format!("failed to start chat client: {e}"))?;

    let history = if args.no_history {
        HistoryPolicy::CurrentTurn
    } else {
        HistoryPolicy::Full
    };
    let config = SessionConfig::default()
        .with_template(template)
        .with_history(history);

    let mut session = RoleplaySession::new(client, TerminalConsole, store, config);
    let outcome = session.run().map_err(|e| e.to_string())?;
    tracing::info!(?outcome, "session ended");
    Ok(())
}
