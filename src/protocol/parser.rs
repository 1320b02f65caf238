//! Console command parsing
//!
//! Lines look like `VERB [username [password]]`. The verb is case-insensitive.
//! A single whitespace character separates the username from the password.
//! The password is everything after it, up to the line terminator, kept
//! byte for byte.

use crate::protocol::Command;

/// Parse a raw input line into a `Command`.
///
/// Missing arguments are passed through as empty strings so the credential
/// service reports them the same way it would for any other caller.
pub fn parse_command(raw: &str) -> Command {
    let line = raw
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(raw)
        .trim_start();
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let args = parts.next().unwrap_or("").trim_start();

    match cmd.as_str() {
        "REGISTER" => {
            let (username, password) = split_credentials(args);
            Command::Register { username, password }
        }
        "LOGIN" => {
            let (username, password) = split_credentials(args);
            Command::Login { username, password }
        }
        "HELP" => Command::Help,
        "QUIT" | "Q" => Command::Quit,
        _ => Command::Unknown(cmd),
    }
}

fn split_credentials(args: &str) -> (String, String) {
    match args.split_once(char::is_whitespace) {
        Some((username, password)) => (username.to_string(), password.to_string()),
        None => (args.to_string(), String::new()),
    }
}
