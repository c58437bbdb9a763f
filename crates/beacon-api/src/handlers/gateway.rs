//! Realtime gateway endpoint
//!
//! WebSocket upgrade plus the per-connection protocol: Hello, Identify
//! within a deadline, Ready, then dispatches flow out through the
//! connection's queue while heartbeats flow in.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use beacon_core::{ChannelRepository, MembershipRepository, Snowflake};
use beacon_gateway::{Connection, GatewayFrame, Room};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// How long a fresh connection has to Identify
const IDENTIFY_DEADLINE: Duration = Duration::from_secs(30);

/// GET /gateway
pub async fn gateway_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();

    if send_frame(&mut sink, &GatewayFrame::hello()).await.is_err() {
        return;
    }

    // Authenticate before anything is registered
    let user_id = match await_identify(&state, &mut sink, &mut stream).await {
        Some(user_id) => user_id,
        None => {
            debug!("Connection closed before a valid Identify");
            return;
        }
    };

    let rooms = match initial_rooms(&state, user_id).await {
        Ok(rooms) => rooms,
        Err(err) => {
            warn!(error = %err, "Failed to load room set for connection");
            return;
        }
    };

    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, rx) = mpsc::channel(state.config().gateway.connection_buffer);
    let connection = Arc::new(Connection::new(session_id.clone(), user_id, tx));
    state.registry().register(Arc::clone(&connection), rooms);

    let ready = GatewayFrame::ready(&beacon_gateway::protocol::ReadyPayload {
        user_id: user_id.to_string(),
        session_id: session_id.clone(),
    });
    if send_frame(&mut sink, &ready).await.is_err() {
        state.registry().unregister(&session_id);
        return;
    }

    info!(session_id = %session_id, user_id = %user_id, "Gateway connection ready");

    // Writer drains the connection queue; started only after Ready so
    // the first dispatched frame never precedes it.
    let writer = tokio::spawn(drain_queue(rx, sink));

    // Reader handles inbound frames until the peer goes away
    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match GatewayFrame::from_json(&text) {
                Ok(frame) if frame.op == beacon_gateway::Opcode::Heartbeat => {
                    connection.deliver(GatewayFrame::heartbeat_ack());
                }
                Ok(frame) => {
                    debug!(op = ?frame.op, "Ignoring unexpected frame");
                }
                Err(err) => {
                    debug!(error = %err, "Dropping malformed frame");
                }
            },
            Message::Close(_) => break,
            // Ping/pong are handled by the transport
            _ => {}
        }
    }

    state.registry().unregister(&session_id);
    writer.abort();
    info!(session_id = %session_id, "Gateway connection closed");
}

/// Wait for an Identify frame and resolve its token. Heartbeats are
/// acknowledged even before authentication.
async fn await_identify(
    state: &AppState,
    sink: &mut SplitSink<WebSocket, Message>,
    stream: &mut SplitStream<WebSocket>,
) -> Option<Snowflake> {
    let deadline = tokio::time::sleep(IDENTIFY_DEADLINE);
    tokio::pin!(deadline);

    loop {
        let message = tokio::select! {
            () = &mut deadline => return None,
            message = stream.next() => message?.ok()?,
        };

        let Message::Text(text) = message else {
            continue;
        };
        let Ok(frame) = GatewayFrame::from_json(&text) else {
            continue;
        };

        if frame.op == beacon_gateway::Opcode::Heartbeat {
            send_frame(sink, &GatewayFrame::heartbeat_ack()).await.ok()?;
            continue;
        }

        if let Some(identify) = frame.as_identify() {
            match state
                .services()
                .token_provider()
                .authenticate(&identify.token)
            {
                Ok(user_id) => return Some(user_id),
                Err(err) => {
                    warn!(error = %err, "Gateway identify rejected");
                    return None;
                }
            }
        }
    }
}

/// The rooms a user starts out subscribed to: every server they are a
/// member of, plus their DM channels.
async fn initial_rooms(
    state: &AppState,
    user_id: Snowflake,
) -> Result<Vec<Room>, beacon_core::DomainError> {
    let services = state.services();

    let mut rooms: Vec<Room> = services
        .memberships()
        .find_by_user(user_id)
        .await?
        .into_iter()
        .map(|m| Room::Server(m.server_id))
        .collect();

    rooms.extend(
        services
            .channels()
            .find_dms_by_user(user_id)
            .await?
            .into_iter()
            .map(|c| Room::Channel(c.id)),
    );

    Ok(rooms)
}

async fn drain_queue(
    mut rx: mpsc::Receiver<GatewayFrame>,
    mut sink: SplitSink<WebSocket, Message>,
) {
    while let Some(frame) = rx.recv().await {
        match frame.to_json() {
            Ok(json) => {
                if sink.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!(error = %err, "Failed to serialize gateway frame"),
        }
    }
}

async fn send_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    frame: &GatewayFrame,
) -> Result<(), axum::Error> {
    let json = frame.to_json().map_err(axum::Error::new)?;
    sink.send(Message::Text(json)).await
}
