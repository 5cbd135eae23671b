//! RCON session with lazy connect and single-retry recovery
//!
//! The session is an explicit state machine over {Disconnected, Connected}.
//! It is a single shared sequential resource; callers serialize access
//! through the collector-wide lock.

use crate::config::RconSettings;
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{info, warn};

/// An established command/response text channel
#[async_trait]
pub trait Transport: Send {
    async fn exec(&mut self, command: &str) -> Result<String>;
}

/// Establishes transports for the session
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Transport>>;
}

/// Production connector speaking the Source RCON protocol
pub struct RconConnector {
    settings: RconSettings,
}

impl RconConnector {
    pub fn new(settings: RconSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for RconConnector {
    async fn connect(&self) -> Result<Box<dyn Transport>> {
        let address = self.settings.address();
        let conn = timeout(
            self.settings.timeout(),
            <rcon::Connection<TcpStream>>::builder()
                .enable_minecraft_quirks(true)
                .connect(&address, &self.settings.password),
        )
        .await
        .map_err(|_| ExporterError::Connection {
            message: format!("connect to {} timed out", address),
        })?
        .map_err(|e| ExporterError::Connection {
            message: e.to_string(),
        })?;

        info!("RCON session established with {}", address);
        Ok(Box::new(RconTransport {
            conn,
            timeout: self.settings.timeout(),
        }))
    }
}

struct RconTransport {
    conn: rcon::Connection<TcpStream>,
    timeout: Duration,
}

#[async_trait]
impl Transport for RconTransport {
    async fn exec(&mut self, command: &str) -> Result<String> {
        let response = timeout(self.timeout, self.conn.cmd(command))
            .await
            .map_err(|_| ExporterError::Connection {
                message: format!("command timed out: {}", command),
            })?
            .map_err(|e| ExporterError::Connection {
                message: e.to_string(),
            })?;
        Ok(response)
    }
}

enum SessionState {
    Disconnected,
    Connected(Box<dyn Transport>),
}

/// Lazily-connected RCON session
pub struct RconSession {
    connector: Box<dyn Connector>,
    state: SessionState,
}

impl RconSession {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            state: SessionState::Disconnected,
        }
    }

    pub fn with_settings(settings: RconSettings) -> Self {
        Self::new(Box::new(RconConnector::new(settings)))
    }

    /// Issue one command and return the full raw text response.
    ///
    /// A failure drops the session and triggers exactly one automatic
    /// reconnect-and-retry; a second failure propagates to the caller.
    pub async fn command(&mut self, command: &str) -> Result<String> {
        match self.try_command(command).await {
            Ok(response) => Ok(response),
            Err(first) => {
                warn!("Lost RCON connection, trying to reconnect: {}", first);
                self.state = SessionState::Disconnected;
                match self.try_command(command).await {
                    Ok(response) => Ok(response),
                    Err(second) => {
                        self.state = SessionState::Disconnected;
                        Err(second)
                    }
                }
            }
        }
    }

    async fn try_command(&mut self, command: &str) -> Result<String> {
        if matches!(self.state, SessionState::Disconnected) {
            let transport = self.connector.connect().await?;
            self.state = SessionState::Connected(transport);
        }
        let SessionState::Connected(transport) = &mut self.state else {
            return Err(ExporterError::Connection {
                message: "session not connected".to_string(),
            }
            .into());
        };
        transport.exec(command).await
    }
}
