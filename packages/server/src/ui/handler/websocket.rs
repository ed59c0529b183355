//! WebSocket connection handlers.
//!
//! このハンドラはトランスポート層として振る舞い、接続・受信・切断を
//! `SessionLifecycleController` に通知します。

use std::sync::Arc;

use axum::{
    extract::{
        RawQuery, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionIdFactory, SessionState},
    infrastructure::message_pusher::WebSocketOutbound,
    ui::state::AppState,
};

/// Query parameter carrying the display name.
const NAME_PARAM: &str = "name";

/// Raw (still percent-encoded) value of `key` in a query string.
///
/// A parameter without `=` is treated as absent.
fn raw_query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let raw_name = query
        .as_deref()
        .and_then(|q| raw_query_param(q, NAME_PARAM))
        .map(str::to_owned);

    ws.on_upgrade(move |socket| handle_socket(socket, state, raw_name))
}

/// Spawns a task that drains the outbound channel into the WebSocket sink.
///
/// The task ends when every sender has been dropped (the connection left the
/// registry) or when a write to the socket fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("WebSocket write failed: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, raw_name: Option<String>) {
    let mut session = SessionState::Connecting;
    let connection_id = ConnectionIdFactory::generate();
    tracing::info!("'{}' has opened a connection", connection_id);

    let (sender, mut receiver) = socket.split();
    let (outbound, rx) = WebSocketOutbound::channel(connection_id.clone());

    // Frames queued during open (welcome, joined) are flushed by this task.
    let mut send_task = pusher_loop(rx, sender);

    let Some(connection) = state
        .lifecycle
        .on_connection_opened(connection_id.as_str(), raw_name.as_deref(), Arc::new(outbound))
        .await
    else {
        send_task.abort();
        return;
    };
    let connection_id = connection.id().clone();
    drop(connection);
    session = session.open();

    while session.accepts_frames() {
        tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    tracing::debug!("Message from '{}': {}", connection_id, text.as_str());
                    state
                        .lifecycle
                        .on_frame_received(&connection_id, text.as_str())
                        .await;
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("'{}' requested close", connection_id);
                    session = session.close();
                }
                Some(Ok(_)) => {
                    // Ping/pong is handled by the WebSocket protocol; binary frames are ignored
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    session = session.close();
                }
                None => session = session.close(),
            },
            _ = &mut send_task => {
                tracing::info!("Outbound stream for '{}' ended", connection_id);
                session = session.close();
            }
        }
    }

    tracing::info!("Session '{}' has ended", connection_id);
    state.lifecycle.on_connection_closed(&connection_id).await;
    send_task.abort();
}
