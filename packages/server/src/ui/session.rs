//! Per-connection session.
//!
//! A `ClientSession` bridges one WebSocket to the registry. It is registered
//! as soon as it is opened, then runs two loops until the connection ends:
//!
//! - inbound: decode each frame and hand it to `RouteMessageUseCase`
//! - outbound: drain the session's queue onto the socket, in enqueue order
//!
//! Whichever loop stops first ends the session. Deregistration closes the
//! queue; the outbound loop then flushes what was already queued and closes
//! the socket. The outbound loop is the only place the socket is closed.

use std::fmt;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{Envelope, Identity, SessionId},
    infrastructure::dto::websocket::WireMessage,
    ui::state::AppState,
    usecase::{ConnectSessionUseCase, DisconnectSessionUseCase, RouteMessageUseCase},
};

/// Lifecycle of a session. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionPhase {
    Created,
    Registered,
    Running,
    Deregistering,
    Closed,
}

/// Why the inbound loop stopped.
enum ReadEnd {
    RemoteClosed,
    StreamEnded,
    Transport(String),
    Decode(String),
}

impl fmt::Display for ReadEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteClosed => write!(f, "closed by peer"),
            Self::StreamEnded => write!(f, "stream ended"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

/// Why the outbound loop stopped.
enum WriteEnd {
    Drained,
    Transport(String),
}

impl fmt::Display for WriteEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drained => write!(f, "queue drained"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

struct Lifecycle {
    session_id: SessionId,
    phase: SessionPhase,
}

impl Lifecycle {
    fn advance(&mut self, next: SessionPhase) {
        debug_assert!(next > self.phase, "session phase must move forward");
        tracing::debug!(
            session_id = %self.session_id,
            "Session phase {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

/// One live connection.
pub struct ClientSession {
    identity: Identity,
    outbound: mpsc::Receiver<Envelope>,
    route: RouteMessageUseCase,
    disconnect: DisconnectSessionUseCase,
    lifecycle: Lifecycle,
}

impl ClientSession {
    /// Register a new session for `identity`.
    ///
    /// From the moment this returns, `deliver` can reach the session.
    pub async fn open(state: &AppState, identity: Identity) -> Self {
        let connect = ConnectSessionUseCase::new(state.registry.clone(), state.outbound_capacity);
        let (session_id, outbound) = connect.execute(identity.clone()).await;

        let mut lifecycle = Lifecycle {
            session_id,
            phase: SessionPhase::Created,
        };
        lifecycle.advance(SessionPhase::Registered);
        tracing::info!(session_id = %session_id, identity = %identity, "Session opened");

        Self {
            identity,
            outbound,
            route: RouteMessageUseCase::new(state.registry.clone()),
            disconnect: DisconnectSessionUseCase::new(state.registry.clone()),
            lifecycle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.lifecycle.phase
    }

    /// Run both loops over the two halves of the transport until the
    /// connection ends, then deregister.
    pub async fn run<W, R, E>(self, sink: W, stream: R)
    where
        W: Sink<Message> + Send + 'static,
        W::Error: fmt::Display + Send,
        R: Stream<Item = Result<Message, E>> + Send,
        E: fmt::Display + Send,
    {
        let Self {
            identity,
            outbound,
            route,
            disconnect,
            mut lifecycle,
        } = self;
        let session_id = lifecycle.session_id;

        lifecycle.advance(SessionPhase::Running);
        let mut writer = tokio::spawn(write_loop(session_id, outbound, sink));

        let writer_finished = tokio::select! {
            end = read_loop(session_id, &identity, &route, stream) => {
                tracing::info!(session_id = %session_id, identity = %identity, "Inbound loop ended: {}", end);
                false
            }
            joined = &mut writer => {
                match joined {
                    Ok(end) => tracing::info!(session_id = %session_id, identity = %identity, "Outbound loop ended first: {}", end),
                    Err(e) => tracing::error!(session_id = %session_id, "Outbound task failed: {}", e),
                }
                true
            }
        };

        lifecycle.advance(SessionPhase::Deregistering);
        if disconnect.execute(session_id).await {
            tracing::debug!(
                "{} session(s) remain",
                disconnect.count_remaining_sessions().await
            );
        }

        // the queue is closed now; the writer flushes and closes the socket
        if !writer_finished {
            match writer.await {
                Ok(end) => tracing::debug!(session_id = %session_id, "Outbound loop ended: {}", end),
                Err(e) => tracing::error!(session_id = %session_id, "Outbound task failed: {}", e),
            }
        }

        lifecycle.advance(SessionPhase::Closed);
        tracing::info!(session_id = %session_id, identity = %identity, "Session closed");
    }
}

async fn read_loop<R, E>(
    session_id: SessionId,
    identity: &Identity,
    route: &RouteMessageUseCase,
    stream: R,
) -> ReadEnd
where
    R: Stream<Item = Result<Message, E>>,
    E: fmt::Display,
{
    tokio::pin!(stream);

    loop {
        let frame = match stream.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => return ReadEnd::Transport(e.to_string()),
            None => return ReadEnd::StreamEnded,
        };

        let decoded = match &frame {
            Message::Text(text) => WireMessage::decode(text.as_str().as_bytes()),
            Message::Binary(bytes) => WireMessage::decode(bytes),
            Message::Close(_) => return ReadEnd::RemoteClosed,
            // answered by the protocol layer
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        let wire = match decoded {
            Ok(wire) => wire,
            Err(e) => {
                tracing::warn!(identity = %identity, "Failed to decode frame: {}", e);
                return ReadEnd::Decode(e.to_string());
            }
        };

        tracing::debug!(identity = %identity, to = %wire.to, from = %wire.from, "Received message");
        let outcome = route.execute(session_id, identity, wire.into()).await;
        tracing::debug!(identity = %identity, "Routed: {:?}", outcome);
    }
}

async fn write_loop<W>(
    session_id: SessionId,
    mut outbound: mpsc::Receiver<Envelope>,
    sink: W,
) -> WriteEnd
where
    W: Sink<Message>,
    W::Error: fmt::Display,
{
    tokio::pin!(sink);
    let mut end = WriteEnd::Drained;

    while let Some(envelope) = outbound.recv().await {
        let text = match WireMessage::from(envelope).encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(session_id = %session_id, "Failed to encode envelope: {}", e);
                continue;
            }
        };

        if let Err(e) = sink.send(Message::Text(text.into())).await {
            tracing::warn!(session_id = %session_id, "Failed to write frame: {}", e);
            end = WriteEnd::Transport(e.to_string());
            break;
        }
    }

    if let Err(e) = sink.close().await {
        tracing::debug!(session_id = %session_id, "Failed to close socket: {}", e);
    }
    end
}
