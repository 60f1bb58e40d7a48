use crate::message::ChatMessage;

/// Whether earlier turns travel with each new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Every request carries all earlier turns, context messages, and
    /// replies.
    #[default]
    Full,
    /// Every request carries only the current turn.
    CurrentTurn,
}

/// The in-memory conversation, never persisted.
///
/// The system message is not part of the history; it is prepended fresh
/// by [`History::request`] each time.
#[derive(Debug, Clone, Default)]
pub struct History {
    policy: HistoryPolicy,
    messages: Vec<ChatMessage>,
}

impl History {
    /// Create an empty history following `policy`.
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            policy,
            messages: Vec::new(),
        }
    }

    /// The policy in effect.
    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Recorded messages, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Assemble the messages for one request: `system`, then either the
    /// whole history with `turn` appended to it, or just `turn`.
    pub fn request(&mut self, system: &ChatMessage, turn: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut out = vec![system.clone()];
        match self.policy {
            HistoryPolicy::Full => {
                self.messages.extend(turn);
                out.extend(self.messages.iter().cloned());
            }
            HistoryPolicy::CurrentTurn => out.extend(turn),
        }
        out
    }

    /// Record the service's reply to the last request.
    pub fn record_reply(&mut self, reply: &str) {
        if self.policy == HistoryPolicy::Full {
            self.messages.push(ChatMessage::assistant(reply));
        }
    }
}
