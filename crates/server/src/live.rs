// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live staging notifications for operator UIs.
//!
//! Events are read-only facts about what changed in the staging set. They
//! are broadcast to every connected WebSocket client, carry no commands, and
//! never replace a read of `/staging`.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use territory_domain::StagedOperation;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live staging event types.
///
/// These events describe changes to an operator's staging set and are purely
/// informational. Clients re-read `/staging` for the authoritative view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// An assignment passed validation and was staged.
    AssignStaged {
        /// The rep type.
        type_id: i64,
        /// The receiving rep.
        rep_id: i64,
        /// The staged territory, as displayed.
        selector: String,
    },
    /// A reassignment passed validation and was staged.
    ReassignStaged {
        /// The rep type.
        type_id: i64,
        /// The rep giving up the territory.
        from_rep_id: i64,
        /// The receiving rep.
        to_rep_id: i64,
        /// The staged territory, as displayed.
        selector: String,
    },
    /// A staged operation was removed.
    OperationRemoved {
        /// The removed operation.
        operation: StagedOperation,
    },
    /// Staging was discarded.
    StagingCleared,
    /// The authority applied a batch.
    BatchConfirmed {
        /// Assignments applied.
        assigns: usize,
        /// Reassignments applied.
        reassigns: usize,
    },
    /// The authority rejected a batch; staging was kept.
    BatchRejected {
        /// Operations still staged.
        staged: usize,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

impl LiveEvent {
    /// Builds the event announcing a newly staged operation.
    #[must_use]
    pub fn staged(operation: &StagedOperation) -> Self {
        match operation {
            StagedOperation::Assign(op) => Self::AssignStaged {
                type_id: op.type_id,
                rep_id: op.rep_id,
                selector: op.selector.to_string(),
            },
            StagedOperation::Reassign(op) => Self::ReassignStaged {
                type_id: op.type_id,
                from_rep_id: op.from_rep_id,
                to_rep_id: op.to_rep_id,
                selector: op.selector.to_string(),
            },
        }
    }
}

/// Fan-out of live staging events to WebSocket clients.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Events sent while nobody listens are dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades a request to a WebSocket that streams live staging events.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `broadcaster` - The live event broadcaster from application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then forwards events until the client
/// goes away.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Live staging client connected");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: LiveEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live staging client fell behind; events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Inbound frames are drained but never acted on
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Ignoring message from live staging client");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Live staging client disconnected");
}
