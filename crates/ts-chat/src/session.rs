//! Roleplay session management.
//!
//! `RoleplaySession` owns the chat service, the console, and the character
//! store. The character itself is resolved inside [`RoleplaySession::run`]
//! and handed by reference to every step that needs it.

use ts_core::{Character, CharacterStore, Console, Output, create_character};

use crate::client::ChatService;
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::history::History;
use crate::message::{ChatMessage, mentions_character};

const USE_SAVED_PROMPT: &str = "Do you want to use a saved character? (yes/no): ";
const TURN_PROMPT: &str = "Your turn: ";

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Checking for a stored character.
    Init,
    /// Loading or creating the character.
    CharacterResolution,
    /// Sending the scripted opening.
    Opening,
    /// Exchanging turns with the service.
    TurnLoop,
    /// Saving and shutting down.
    Terminated,
}

/// How a session ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A reply carried the end-of-story signal.
    Finished {
        /// Player turns exchanged, not counting the opening.
        turns: usize,
    },
    /// The console reached end of input during the turn loop.
    InputClosed {
        /// Player turns exchanged, not counting the opening.
        turns: usize,
    },
}

/// An interactive roleplay session against a chat service.
pub struct RoleplaySession<S, C> {
    service: S,
    console: C,
    store: CharacterStore,
    config: SessionConfig,
    history: History,
    system: ChatMessage,
    phase: Phase,
}

impl<S: ChatService, C: Console> RoleplaySession<S, C> {
    /// Create a session. Nothing happens until [`RoleplaySession::run`].
    pub fn new(service: S, console: C, store: CharacterStore, config: SessionConfig) -> Self {
        let history = History::new(config.history);
        let system = ChatMessage::system(config.system_prompt.clone());
        Self {
            service,
            console,
            store,
            config,
            history,
            system,
            phase: Phase::Init,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The conversation so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The chat service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// The character store.
    pub fn store(&self) -> &CharacterStore {
        &self.store
    }

    /// Run the whole session: resolve the character, open the story, loop
    /// over turns, and save the character on the way out.
    ///
    /// A chat or console failure during play still saves the character
    /// before the error is returned.
    pub fn run(&mut self) -> SessionResult<SessionOutcome> {
        self.enter(Phase::Init);
        let has_saved = self.store.exists();

        self.enter(Phase::CharacterResolution);
        let character = self.resolve_character(has_saved)?;
        self.save(&character)?;

        let outcome = self.play(&character);

        self.enter(Phase::Terminated);
        let saved = self.save(&character);

        match (outcome, saved) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(save_err)) => {
                tracing::error!(error = %save_err, "failed to save character after session error");
                Err(e)
            }
        }
    }

    /// Send one turn to the service and return its reply unchanged.
    ///
    /// When the turn mentions the character, a context message with the
    /// character sheet goes along with it.
    pub fn send_message(&mut self, text: &str, character: &Character) -> SessionResult<String> {
        let mut turn = vec![ChatMessage::user(text)];
        if mentions_character(text) {
            let context = ChatMessage::character_context(character)?;
            self.console.show(Output::Context(context.content.clone()));
            turn.push(context);
        }

        let request = self.history.request(&self.system, turn);
        let reply = self.service.complete(&request)?;
        self.history.record_reply(&reply);
        Ok(reply)
    }

    fn resolve_character(&mut self, has_saved: bool) -> SessionResult<Character> {
        if has_saved && self.confirm_use_saved()? {
            let character = self.store.load();
            self.console.show(Output::Info("Character loaded:".to_string()));
            self.console.show(Output::Sheet(character.to_string()));
            return Ok(character);
        }
        Ok(create_character(&mut self.console, &self.config.template)?)
    }

    fn confirm_use_saved(&mut self) -> SessionResult<bool> {
        let answer = self
            .console
            .ask(USE_SAVED_PROMPT)?
            .ok_or(SessionError::InputClosed)?;
        Ok(answer.to_lowercase() == "yes")
    }

    fn play(&mut self, character: &Character) -> SessionResult<SessionOutcome> {
        self.enter(Phase::Opening);
        let opening = self.config.opening_message.clone();
        let reply = self.send_message(&opening, character)?;
        self.console.show(Output::Reply(reply));

        self.enter(Phase::TurnLoop);
        let mut turns = 0;
        loop {
            let Some(input) = self.console.ask(TURN_PROMPT)? else {
                tracing::debug!(turns, "input closed during turn loop");
                return Ok(SessionOutcome::InputClosed { turns });
            };
            if input.trim().is_empty() {
                continue;
            }

            let reply = self.send_message(&input, character)?;
            turns += 1;

            let finished = (self.config.finished)(&reply);
            self.console.show(Output::Reply(reply));
            if finished {
                self.console
                    .show(Output::Info("Roleplay finished.".to_string()));
                return Ok(SessionOutcome::Finished { turns });
            }
        }
    }

    fn save(&mut self, character: &Character) -> SessionResult<()> {
        self.store.save(character)?;
        self.console.show(Output::Info(format!(
            "Character saved to {}",
            self.store.path().display()
        )));
        Ok(())
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "session phase");
        self.phase = phase;
    }
}
