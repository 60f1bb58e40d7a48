use std::io::{self, BufRead, Write};

use colored::Colorize;

use ts_core::{Console, Output};

/// Console on the process's stdin and stdout.
///
/// Stdin is locked for one line at a time and released after each answer.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn show(&mut self, output: Output) {
        match output {
            Output::Info(text) | Output::Sheet(text) | Output::Reply(text) => println!("{text}"),
            Output::Context(text) => println!("{}", text.green()),
        }
    }
}
