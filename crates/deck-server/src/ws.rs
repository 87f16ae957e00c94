//! WebSocket command channel.
//!
//! Clients send JSON commands and receive the resulting slide view. The
//! current view is pushed once when the socket opens.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use deck_core::{InputEvent, Key, SlideView};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{AppState, DeckResponse};

/// Commands accepted over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    GetView,
    Next,
    Previous,
    Goto { index: usize },
    /// DOM `KeyboardEvent.key` value
    Key { key: String },
}

/// Messages sent back to the client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsResponse {
    View(SlideView),
    Navigation(DeckResponse),
    Error { message: String },
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let initial = WsResponse::View(state.view().await);
    if send(&mut socket, &initial).await.is_err() {
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(e) => {
                        debug!(error = %e, "unrecognized websocket command");
                        WsResponse::Error {
                            message: e.to_string(),
                        }
                    }
                };
                if send(&mut socket, &response).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> Result<(), axum::Error> {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            debug!(error = %e, "failed to encode websocket response");
            Ok(())
        }
    }
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetView => WsResponse::View(state.view().await),
        WsCommand::Next => WsResponse::Navigation(state.next().await),
        WsCommand::Previous => WsResponse::Navigation(state.previous().await),
        WsCommand::Goto { index } => WsResponse::Navigation(state.go_to(index).await),
        WsCommand::Key { key } => {
            let key = Key::from_dom(&key);
            WsResponse::Navigation(state.input(InputEvent::Key { key }).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::ControllerConfig;

    #[test]
    fn commands_parse() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"goto","index":7}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Goto { index: 7 }));
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"key","key":"ArrowRight"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Key { ref key } if key == "ArrowRight"));
        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"seek"}"#).is_err());
    }

    #[tokio::test]
    async fn key_command_navigates() {
        let state = AppState::new(ControllerConfig::default()).unwrap();
        let cmd = WsCommand::Key {
            key: " ".to_string(),
        };
        match handle_ws_command(&state, cmd).await {
            WsResponse::Navigation(response) => {
                assert!(response.navigated);
                assert!(response.prevent_default);
                assert_eq!(response.view.current, 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn view_response_is_tagged() {
        let state = AppState::new(ControllerConfig::default()).unwrap();
        let view = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(state.view());
        let json = serde_json::to_value(WsResponse::View(view)).unwrap();
        assert_eq!(json["type"], "view");
        assert_eq!(json["counter"], "1");
    }
}
