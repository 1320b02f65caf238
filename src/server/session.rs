use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::auth::CredentialHandle;
use crate::config::ConsoleConfig;
use crate::error::handlers::BAD_REQUEST;
use crate::protocol::responses::{READY, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};

/// Line-oriented front end over the credential service.
pub struct Server {
    handle: CredentialHandle,
    config: ConsoleConfig,
}

impl Server {
    pub fn new(handle: CredentialHandle, config: ConsoleConfig) -> Self {
        Self { handle, config }
    }

    /// Runs one session: greets, then answers each line until QUIT or EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), std::io::Error>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(format_response(READY, "Credential service ready").as_bytes())
            .await?;
        writer.flush().await?;

        info!("Console session started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).await?;
            if n == 0 {
                info!("Console input closed");
                return Ok(());
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!("Discarding {} byte line that is not valid UTF-8", n);
                writer
                    .write_all(format_response(BAD_REQUEST, "Malformed input").as_bytes())
                    .await?;
                writer.flush().await?;
                continue;
            };

            if line.trim().is_empty() {
                continue;
            }

            let command = parse_command(line);
            let result = handle_command(&self.handle, command, &self.config).await;

            if let CommandStatus::Failure(reason) = &result.status {
                warn!("Command failed with {}: {}", result.code, reason);
            }

            writer.write_all(result.message.as_bytes()).await?;
            writer.flush().await?;

            if result.status == CommandStatus::CloseConnection {
                info!("Console session closed");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Argon2Policy, CredentialService};
    use crate::config::{HashingConfig, PolicyConfig};
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio::io::BufReader;

    fn server() -> Server {
        let hasher = Argon2Policy::new(&HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let handle = CredentialHandle::new(CredentialService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(hasher),
            PolicyConfig::default(),
        ));
        Server::new(handle, ConsoleConfig::default())
    }

    #[tokio::test]
    async fn test_session_transcript() {
        let input = b"REGISTER alice secret123\n\nLOGIN alice secret123\nQUIT\nLOGIN alice secret123\n";
        let mut output = Vec::new();

        server()
            .serve(BufReader::new(&input[..]), &mut output)
            .await
            .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("220"));
        assert_eq!(lines[1], "201 Account created");
        assert!(lines[2].starts_with("200 Login successful for alice"));
        assert_eq!(lines[3], "221 Goodbye");
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let mut output = Vec::new();
        server()
            .serve(BufReader::new(&b"LOGIN ghost secret123"[..]), &mut output)
            .await
            .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.ends_with("401 Invalid credentials\n"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_session_open() {
        let input = b"LOGIN al\xffice secret123\nREGISTER bob secret123\n";
        let mut output = Vec::new();

        server()
            .serve(BufReader::new(&input[..]), &mut output)
            .await
            .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("220"));
        assert_eq!(lines[1], "400 Malformed input");
        assert_eq!(lines[2], "201 Account created");
    }
}
