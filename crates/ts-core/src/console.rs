use std::collections::VecDeque;
use std::io;

/// Something shown to the user, tagged by what it is so the frontend can
/// decide how to style it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A status line from the application itself.
    Info(String),
    /// A character sheet or similar indented block.
    Sheet(String),
    /// The chat service's reply.
    Reply(String),
    /// Character context that was attached to an outgoing turn.
    Context(String),
}

impl Output {
    /// The unstyled text of this output.
    pub fn text(&self) -> &str {
        match self {
            Self::Info(s) | Self::Sheet(s) | Self::Reply(s) | Self::Context(s) => s,
        }
    }
}

/// A line-oriented console.
pub trait Console {
    /// Show `question` and block until one line is entered.
    ///
    /// Returns `Ok(None)` at end of input. The returned line has its line
    /// terminator removed but is otherwise untouched.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    /// Display one output block.
    fn show(&mut self, output: Output);
}

/// An in-memory console that replays scripted answers and records
/// everything asked and shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    questions: Vec<String>,
    shown: Vec<Output>,
}

impl ScriptedConsole {
    /// Create a console that answers with `answers`, in order, then reports
    /// end of input.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every question asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Every output shown so far.
    pub fn shown(&self) -> &[Output] {
        &self.shown
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    fn show(&mut self, output: Output) {
        self.shown.push(output);
    }
}
