//! Line-delimited JSON presence client.
//!
//! The connection is read on a spawned task; every decoded event is folded
//! into a [`PresenceState`] published through a `watch` channel, so the host
//! loop can poll the latest state without awaiting.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::PresenceError;
use crate::event::{PresenceEvent, PresenceState};

const SCHEMES: [&str; 3] = ["tcp://", "ws://", "http://"];

/// `host:port`, with any supported scheme prefix and trailing path removed.
pub fn parse_endpoint(endpoint: &str) -> Result<String, PresenceError> {
    let trimmed = endpoint.trim();
    let rest = SCHEMES
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(scheme))
        .unwrap_or(trimmed);
    let authority = rest.split('/').next().unwrap_or_default();

    match authority.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
            Ok(authority.to_string())
        }
        _ => Err(PresenceError::InvalidEndpoint(endpoint.to_string())),
    }
}

pub struct PresenceClient {
    state: Arc<watch::Sender<PresenceState>>,
    rx: watch::Receiver<PresenceState>,
    reader: Option<JoinHandle<()>>,
}

impl PresenceClient {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(PresenceState::default());
        Self {
            state: Arc::new(tx),
            rx,
            reader: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.rx.borrow().connected
    }

    /// Latest published state.
    pub fn state(&self) -> PresenceState {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PresenceState> {
        self.state.subscribe()
    }

    /// Opens the connection and starts the reader task.
    ///
    /// Does nothing while a previous connection is still live.
    pub async fn connect(&mut self, endpoint: &str) -> Result<(), PresenceError> {
        if self.is_connected() && self.reader.as_ref().is_some_and(|r| !r.is_finished()) {
            debug!(endpoint, "presence already connected");
            return Ok(());
        }
        if let Some(stale) = self.reader.take() {
            stale.abort();
        }

        let addr = parse_endpoint(endpoint)?;
        let stream = TcpStream::connect(&addr).await?;
        info!(%addr, "presence connected");
        self.state.send_modify(|s| s.apply(PresenceEvent::Connect));

        let state = Arc::clone(&self.state);
        self.reader = Some(tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => {}
                    Ok(Some(line)) => match PresenceEvent::parse(&line) {
                        Ok(event) => state.send_modify(|s| s.apply(event)),
                        Err(err) => warn!(%err, "skipping presence line"),
                    },
                    Ok(None) => break,
                    Err(err) => {
                        warn!(%err, "presence read failed");
                        break;
                    }
                }
            }
            info!("presence connection closed");
            state.send_modify(|s| s.apply(PresenceEvent::Disconnect));
        }));
        Ok(())
    }

    /// Drops the connection. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
            debug!("presence reader stopped");
        }
        self.state.send_if_modified(|s| {
            let was = s.connected;
            s.connected = false;
            was
        });
    }
}

impl Default for PresenceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PresenceClient {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_schemes_are_stripped() {
        assert_eq!(parse_endpoint("127.0.0.1:9000").unwrap(), "127.0.0.1:9000");
        assert_eq!(parse_endpoint("tcp://host:1").unwrap(), "host:1");
        assert_eq!(parse_endpoint("ws://host:80/socket").unwrap(), "host:80");
        assert_eq!(parse_endpoint(" http://h:8080 ").unwrap(), "h:8080");
    }

    #[test]
    fn endpoint_requires_host_and_port() {
        for bad in ["", "host", ":80", "host:", "host:http", "ftp://host:21x"] {
            assert!(
                matches!(parse_endpoint(bad), Err(PresenceError::InvalidEndpoint(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn disconnect_without_connection_is_noop() {
        let mut client = PresenceClient::new();
        client.disconnect();
        client.disconnect();
        assert!(!client.is_connected());
    }
}
