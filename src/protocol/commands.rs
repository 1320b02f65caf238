//! Module `commands`
//!
//! Data structures for console commands and the results of executing them.

use std::fmt;

/// A console command parsed from one input line.
///
/// `Debug` output never includes passwords.
#[derive(PartialEq, Eq)]
pub enum Command {
    Register { username: String, password: String },
    Login { username: String, password: String },
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// The command verb, safe to log.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "REGISTER",
            Command::Login { .. } => "LOGIN",
            Command::Help => "HELP",
            Command::Quit => "QUIT",
            Command::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Register { username, .. } => f
                .debug_struct("Register")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Command::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Command::Help => write!(f, "Help"),
            Command::Quit => write!(f, "Quit"),
            Command::Unknown(verb) => f.debug_tuple("Unknown").field(verb).finish(),
        }
    }
}

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub code: u16,
    pub message: String,
}
