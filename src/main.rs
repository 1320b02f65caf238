//! Credential Service - Entry Point
//!
//! Registers accounts and verifies logins over a line-oriented console on
//! stdin/stdout.

use std::sync::Arc;

use log::info;
use tokio::io::{BufReader, stdin, stdout};

use credential_service::config::ServiceConfig;
use credential_service::error::handlers::handle_error;
use credential_service::storage::open_store;
use credential_service::{
    Argon2Policy, CredentialHandle, CredentialService, Server, ServiceError,
};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching credential service...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServiceError> {
    let config = ServiceConfig::load()?;

    let store = open_store(&config.storage)?;
    let hasher = Argon2Policy::new(&config.hashing)?;
    let service = CredentialService::new(store, Arc::new(hasher), config.policy.clone());

    let server = Server::new(CredentialHandle::new(service), config.console.clone());
    server.serve(BufReader::new(stdin()), stdout()).await?;

    info!("Credential service stopped");
    Ok(())
}
