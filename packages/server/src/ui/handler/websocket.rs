//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{domain::ConnectionId, ui::state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sink.
fn pusher_loop(
    connection: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("Write to '{}' failed: {}", connection, e);
                break;
            }
        }
    })
}

/// Spawns a task that feeds every inbound text frame to the dispatcher, one at a time.
fn reader_loop(
    connection: ConnectionId,
    state: Arc<AppState>,
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection, text.as_str());
                    state.dispatcher.dispatch(&connection, text.as_str()).await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

/// Waits for either task to finish, then aborts the other and waits until it has
/// stopped. No dispatch of the connection can still be running afterwards.
async fn join_first_then_abort(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = state.connect_participant_usecase.execute(tx).await;
    tracing::info!("Connection '{}' opened", connection);

    let (sender, receiver) = socket.split();

    let recv_task = reader_loop(connection, state.clone(), receiver);
    let send_task = pusher_loop(connection, rx, sender);
    join_first_then_abort(recv_task, send_task).await;

    let removed = state.dispatcher.close(&connection).await;
    tracing::info!(
        "Connection '{}' closed ({} session(s) removed)",
        connection,
        removed
    );
}
