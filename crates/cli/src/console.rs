//! Line-oriented console over any reader/writer pair.

use core::fmt::Display;
use std::io::{self, BufRead, Write};

use secrecy::SecretString;
use thiserror::Error;

/// Errors that end the interactive session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// End of input.
    #[error("input closed")]
    Closed,

    /// Reading or writing the terminal failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Prompts on `output`, reads answers from `input`.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console reading answers from `input` and writing prompts to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `label` and read one line without its terminator.
    ///
    /// Returns `ConsoleError::Closed` at end of input.
    pub fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(line)
    }

    /// Like [`Console::ask`], but the answer goes straight into a secret.
    pub fn ask_secret(&mut self, label: &str) -> Result<SecretString, ConsoleError> {
        self.ask(label).map(SecretString::from)
    }

    /// Ask for a number; `None` (after telling the user) if it does not parse.
    pub fn ask_number(&mut self, label: &str) -> Result<Option<u32>, ConsoleError> {
        let answer = self.ask(label)?;
        match answer.trim().parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                self.say("Please enter a whole number")?;
                Ok(None)
            }
        }
    }

    /// Ask a yes/no question; only `y`/`Y` counts as yes.
    pub fn confirm(&mut self, label: &str) -> Result<bool, ConsoleError> {
        Ok(self.ask(label)?.trim().eq_ignore_ascii_case("y"))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
