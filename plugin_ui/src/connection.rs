/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The persistent event channel to the plugin server.
//!
//! The WebSocket itself is driven by a spawned task. The task never
//! touches client state; it reports lifecycle changes as
//! [`ChannelNotification`]s, and the owner of the [`EventChannel`]
//! feeds them back through [`EventChannel::apply`] from its event
//! loop. Status and ready state therefore always reflect the most
//! recent notification the loop has processed.
//!
//! State machine (status / ready):
//!
//! ```text
//! Disconnected/Connecting --Opened--> Connected/Open
//! Connected/Open          --Error---> Error/Open
//! any                     --Closed--> Disconnected/Closed
//! ```
//!
//! Sends are honored only in ready state `Open` and are otherwise
//! dropped. A close requested while still connecting is queued to the
//! socket task, which acts on it as soon as the connect attempt
//! resolves.

use std::fmt;

use futures::SinkExt;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::bus::EventEnvelope;

/// Connection status as last reported by the channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    Error,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Error => write!(f, "Error"),
        }
    }
}

/// Socket readiness, mirroring the WebSocket `readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Lifecycle notification emitted by the socket task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelNotification {
    /// The connect attempt succeeded.
    Opened,
    /// A transport error occurred. Always followed by `Closed`.
    Error(String),
    /// The socket is gone, for whatever reason.
    Closed,
}

/// Work queued for the socket task.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outbound {
    Frame(String),
    Close,
}

/// Client side of the event channel.
pub struct EventChannel {
    url: String,
    status: ConnectionStatus,
    ready: ReadyState,
    close_requested: bool,
    outbound: mpsc::UnboundedSender<Outbound>,
    task: Option<JoinHandle<()>>,
}

impl EventChannel {
    /// Start connecting to `url` in the background.
    ///
    /// Returns the channel handle and the stream of lifecycle
    /// notifications the caller must feed back through
    /// [`EventChannel::apply`]. Must be called from within a tokio
    /// runtime. No timeout is applied to the connect attempt.
    pub fn connect(url: &str) -> (Self, mpsc::UnboundedReceiver<ChannelNotification>) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        tracing::info!(url, "opening event channel");
        let task = tokio::spawn(drive_socket(url.to_string(), outbound_rx, notify_tx));
        let mut channel = Self::detached(url, outbound_tx);
        channel.task = Some(task);
        (channel, notify_rx)
    }

    fn detached(url: &str, outbound: mpsc::UnboundedSender<Outbound>) -> Self {
        Self {
            url: url.to_string(),
            status: ConnectionStatus::Disconnected,
            ready: ReadyState::Connecting,
            close_requested: false,
            outbound,
            task: None,
        }
    }

    /// A channel with no socket task behind it; outbound work is
    /// exposed directly.
    #[cfg(test)]
    pub(crate) fn test_pair(url: &str) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::detached(url, tx), rx)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready
    }

    pub fn is_open(&self) -> bool {
        self.ready == ReadyState::Open
    }

    /// Apply a lifecycle notification from the socket task.
    pub fn apply(&mut self, notification: ChannelNotification) {
        match notification {
            ChannelNotification::Opened => {
                tracing::info!(url = %self.url, "event channel opened");
                self.status = ConnectionStatus::Connected;
                // A close requested while connecting is already queued
                // ahead of anything else; the task closes right away.
                self.ready = if self.close_requested {
                    ReadyState::Closing
                } else {
                    ReadyState::Open
                };
            }
            ChannelNotification::Error(msg) => {
                tracing::error!(url = %self.url, error = %msg, "event channel error");
                self.status = ConnectionStatus::Error;
            }
            ChannelNotification::Closed => {
                tracing::info!(url = %self.url, "event channel closed");
                self.status = ConnectionStatus::Disconnected;
                self.ready = ReadyState::Closed;
            }
        }
    }

    /// Send one envelope. Returns whether it was handed to the socket.
    ///
    /// Anything sent while the channel is not open is dropped, not
    /// queued.
    pub fn send(&self, envelope: &EventEnvelope) -> bool {
        if !self.is_open() {
            tracing::debug!(
                event = %envelope.event,
                ready = ?self.ready,
                "event channel not open; dropping event"
            );
            return false;
        }
        let frame = match envelope.to_json() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(event = %envelope.event, error = %e, "failed to encode event");
                return false;
            }
        };
        self.outbound.send(Outbound::Frame(frame)).is_ok()
    }

    /// Tear the channel down.
    ///
    /// Open channels close immediately. A channel that is still
    /// connecting closes once the attempt resolves. Returns the socket
    /// task so the caller can wait for it; `None` if there is nothing
    /// left to wait for.
    pub fn close(&mut self) -> Option<JoinHandle<()>> {
        match self.ready {
            ReadyState::Open => {
                let _ = self.outbound.send(Outbound::Close);
                self.ready = ReadyState::Closing;
            }
            ReadyState::Connecting if !self.close_requested => {
                tracing::debug!(url = %self.url, "close deferred until connect resolves");
                let _ = self.outbound.send(Outbound::Close);
                self.close_requested = true;
            }
            ReadyState::Connecting | ReadyState::Closing | ReadyState::Closed => {}
        }
        self.task.take()
    }
}

/// Connect to `url`, then pump outbound frames until asked to close
/// or the server goes away. Inbound frames are ignored.
async fn drive_socket(
    url: String,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    notify: mpsc::UnboundedSender<ChannelNotification>,
) {
    let (mut socket, _response) = match connect_async(url.as_str()).await {
        Ok(connected) => connected,
        Err(e) => {
            let _ = notify.send(ChannelNotification::Error(e.to_string()));
            let _ = notify.send(ChannelNotification::Closed);
            return;
        }
    };
    let _ = notify.send(ChannelNotification::Opened);

    loop {
        tokio::select! {
            work = outbound.recv() => match work {
                Some(Outbound::Frame(frame)) => {
                    if let Err(e) = socket.send(Message::Text(frame)).await {
                        let _ = notify.send(ChannelNotification::Error(e.to_string()));
                        break;
                    }
                }
                // The handle going away counts as a close request.
                Some(Outbound::Close) | None => {
                    if let Err(e) = socket.close(None).await {
                        tracing::debug!(error = %e, "close handshake failed");
                        break;
                    }
                    // Drain until the server acknowledges the close.
                    while let Some(Ok(_)) = socket.next().await {}
                    break;
                }
            },
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "server closed event channel");
                }
                Some(Ok(message)) => {
                    tracing::debug!(len = message.len(), "ignoring inbound message");
                }
                Some(Err(e)) => {
                    let _ = notify.send(ChannelNotification::Error(e.to_string()));
                    break;
                }
                None => break,
            },
        }
    }
    let _ = notify.send(ChannelNotification::Closed);
}
