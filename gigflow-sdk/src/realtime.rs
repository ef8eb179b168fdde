//! Realtime notification channel.
//!
//! One persistent connection per authenticated session, carrying
//! newline-delimited JSON frames. On activation the client opens the
//! transport and sends a single registration frame with the session's user
//! id; a spawned reader task pushes inbound [`Notification`]s into an mpsc
//! channel for the consumer to drain.
//!
//! The SDK does not reconnect. Consumers that want automatic reconnection
//! should listen for [`Notification::Disconnected`] and re-activate with
//! their own backoff. Transport failures are never fatal — the rest of the
//! client works fine without live notifications.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::event::Notification;

/// Client side of the notification channel. Created disconnected; the
/// session lifecycle activates it on login and deactivates it on logout.
pub struct RealtimeClient {
    addr: String,
    notify_tx: mpsc::Sender<Notification>,
    conn: Option<Connection>,
}

struct Connection {
    user_id: String,
    writer: OwnedWriteHalf,
    reader: JoinHandle<()>,
}

impl RealtimeClient {
    /// Returns the client and the receiver the consumer drains for
    /// notifications. `addr` is `host:port` of the notification endpoint.
    pub fn new(addr: impl Into<String>) -> (Self, mpsc::Receiver<Notification>) {
        let (notify_tx, notify_rx) = mpsc::channel(256);
        (
            Self {
                addr: addr.into(),
                notify_tx,
                conn: None,
            },
            notify_rx,
        )
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// The user id sent in the registration frame, while connected.
    pub fn registered_user_id(&self) -> Option<&str> {
        self.conn.as_ref().map(|c| c.user_id.as_str())
    }

    /// Open the transport and register `user_id`. Idempotent: if a
    /// connection is already up this is a no-op and no second transport is
    /// opened.
    pub async fn activate(&mut self, user_id: &str) -> Result<()> {
        if self.conn.is_some() {
            tracing::debug!(user_id, "realtime already connected, activate is a no-op");
            return Ok(());
        }

        let stream = TcpStream::connect(&self.addr).await?;
        let (read_half, mut writer) = stream.into_split();

        let frame = format!(
            "{}\n",
            serde_json::json!({ "type": "register", "userId": user_id })
        );
        writer.write_all(frame.as_bytes()).await?;
        tracing::debug!(user_id, addr = %self.addr, "realtime channel registered");

        let reader = tokio::spawn(read_loop(read_half, self.notify_tx.clone()));
        self.conn = Some(Connection {
            user_id: user_id.to_string(),
            writer,
            reader,
        });
        Ok(())
    }

    /// Close the transport. Safe to call when not connected, including when
    /// `activate` was never called.
    pub async fn deactivate(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };
        let _ = conn.writer.shutdown().await;
        conn.reader.abort();
        tracing::debug!("realtime channel closed");
    }
}

async fn read_loop(read_half: OwnedReadHalf, tx: mpsc::Sender<Notification>) {
    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<Notification>(line) {
                    Ok(n) => {
                        if tx.send(n).await.is_err() {
                            // Consumer dropped the receiver; stop reading.
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, frame = line, "unrecognized realtime frame, skipping");
                    }
                }
            }
            Ok(None) => {
                let _ = tx
                    .send(Notification::Disconnected {
                        reason: "EOF".to_string(),
                    })
                    .await;
                break;
            }
            Err(e) => {
                let _ = tx
                    .send(Notification::Disconnected {
                        reason: e.to_string(),
                    })
                    .await;
                break;
            }
        }
    }
}
