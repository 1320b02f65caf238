//! Command handlers for the credential console.
//!
//! Each handler calls the credential service and turns its outcome into a
//! status-coded reply. Status codes follow the HTTP meanings used by
//! `error::handlers`.

use log::info;

use crate::auth::{CredentialHandle, VerificationResult};
use crate::config::ConsoleConfig;
use crate::error::handlers::{
    BAD_REQUEST, CREATED, OK, login_error_status, register_error_status, verification_status,
};
use crate::protocol::responses::{CLOSING, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};

const HELP_TEXT: &str = "Commands: REGISTER <username> <password>, LOGIN <username> <password>, HELP, QUIT";

/// Dispatches a parsed command to its handler.
pub async fn handle_command(
    handle: &CredentialHandle,
    command: Command,
    config: &ConsoleConfig,
) -> CommandResult {
    info!("Console command: {}", command.name());

    match command {
        Command::Register { username, password } => {
            handle_cmd_register(handle, username, password).await
        }
        Command::Login { username, password } => {
            handle_cmd_login(handle, username, password, config).await
        }
        Command::Help => reply(CommandStatus::Success, OK, HELP_TEXT),
        Command::Quit => reply(CommandStatus::CloseConnection, CLOSING, "Goodbye"),
        Command::Unknown(_) => reply(
            CommandStatus::Failure("unknown command".into()),
            BAD_REQUEST,
            "Unknown command",
        ),
    }
}

/// Handles REGISTER: creates the account or reports why it was refused.
async fn handle_cmd_register(
    handle: &CredentialHandle,
    username: String,
    password: String,
) -> CommandResult {
    match handle.register(username, password).await {
        Ok(()) => reply(CommandStatus::Success, CREATED, "Account created"),
        Err(e) => reply(
            CommandStatus::Failure(e.to_string()),
            register_error_status(&e),
            &e.to_string(),
        ),
    }
}

/// Handles LOGIN: on success the reply carries the configured redirect hint.
async fn handle_cmd_login(
    handle: &CredentialHandle,
    username: String,
    password: String,
    config: &ConsoleConfig,
) -> CommandResult {
    match handle.authenticate(username, password).await {
        Ok(result) => {
            let code = verification_status(&result);
            match result {
                VerificationResult::Success(username) => reply(
                    CommandStatus::Success,
                    code,
                    &format!(
                        "Login successful for {}; redirect {}",
                        username, config.login_redirect
                    ),
                ),
                VerificationResult::InvalidCredentials => reply(
                    CommandStatus::Failure("invalid credentials".into()),
                    code,
                    "Invalid credentials",
                ),
                VerificationResult::ValidationError(reason) => {
                    reply(CommandStatus::Failure(reason.clone()), code, &reason)
                }
            }
        }
        Err(e) => reply(
            CommandStatus::Failure(e.to_string()),
            login_error_status(&e),
            &e.to_string(),
        ),
    }
}

fn reply(status: CommandStatus, code: u16, message: &str) -> CommandResult {
    CommandResult {
        status,
        code,
        message: format_response(code, message),
    }
}
