//! Parsing of typed input lines.

use crate::error::CommandError;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `@<identity> <text>`
    Send { to: String, message: String },
    /// `/roster`
    Roster,
    /// `/quit`
    Quit,
    /// Blank line
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(Self::Empty);
        }

        if let Some(rest) = line.strip_prefix('@') {
            let (to, message) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let message = message.trim_start();
            if message.is_empty() {
                return Err(CommandError::MissingMessage(to.to_string()));
            }
            return Ok(Self::Send {
                to: to.to_string(),
                message: message.to_string(),
            });
        }

        match line {
            "/roster" => Ok(Self::Roster),
            "/quit" | "/exit" => Ok(Self::Quit),
            other if other.starts_with('/') => Err(CommandError::UnknownCommand(other.to_string())),
            _ => Err(CommandError::MissingRecipient),
        }
    }
}
