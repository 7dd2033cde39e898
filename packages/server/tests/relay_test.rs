//! End-to-end tests using real WebSocket clients against an in-process relay.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use heya_server::{
    infrastructure::{
        dto::http::{RoomDetailDto, RoomSummaryDto},
        message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionRepository,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinPolicy, JoinRoomUseCase, SendMessageUseCase,
    },
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

const TIMEOUT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(300);

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Helper struct to manage an in-process relay
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start(policy: JoinPolicy) -> Self {
        let repository = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let server = Server::new(
            Arc::new(ConnectParticipantUseCase::new(message_pusher.clone())),
            Arc::new(JoinRoomUseCase::new(repository.clone(), policy)),
            Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(GetRoomsUseCase::new(repository.clone())),
            Arc::new(GetRoomDetailUseCase::new(repository.clone())),
        );

        // port 0 = auto-assign
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async move {
            let _ = rx.await;
        }));

        TestServer {
            addr,
            shutdown: Some(tx),
        }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> WsStream {
        let (ws, _response) = connect_async(self.ws_url()).await.unwrap();
        ws
    }

    async fn rooms(&self) -> Vec<RoomSummaryDto> {
        reqwest::get(self.http_url("/api/rooms"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    /// Poll `/api/rooms` until `room` has exactly `members` sessions
    async fn wait_for_members(&self, room: &str, members: usize) {
        let poll = async {
            loop {
                let count = self
                    .rooms()
                    .await
                    .into_iter()
                    .find(|r| r.id == room)
                    .map(|r| r.members)
                    .unwrap_or(0);
                if count == members {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        };
        timeout(TIMEOUT, poll)
            .await
            .unwrap_or_else(|_| panic!("room '{}' never reached {} member(s)", room, members));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::text(value.to_string())).await.unwrap();
}

async fn join(ws: &mut WsStream, room: &str, name: &str) {
    send_json(ws, json!({"type":"join","payload":{"roomId":room,"name":name}})).await;
}

async fn chat(ws: &mut WsStream, message: &str, name: &str) {
    send_json(ws, json!({"type":"chat","payload":{"message":message,"name":name}})).await;
}

/// Next text frame as JSON, failing after `TIMEOUT`
async fn recv_json(ws: &mut WsStream) -> Value {
    loop {
        let msg = timeout(TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

/// Assert no text frame arrives within `QUIET`
async fn assert_silent(ws: &mut WsStream) {
    if let Ok(Some(Ok(Message::Text(text)))) = timeout(QUIET, ws.next()).await {
        panic!("unexpected frame: {}", text.as_str());
    }
}

#[tokio::test]
async fn test_room_scenario_over_websocket() {
    // テスト項目: 同じルームの A と B には届き、別ルームの C には届かない
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    join(&mut a, "12345", "Alice").await;
    join(&mut b, "12345", "Bob").await;
    server.wait_for_members("12345", 2).await;

    // when (操作):
    chat(&mut a, "hi", "Alice").await;

    // then (期待する結果): 送信者にもエコーされる
    let expected = json!({"type":"chat","payload":{"message":"hi","name":"Alice"}});
    assert_eq!(recv_json(&mut a).await, expected);
    assert_eq!(recv_json(&mut b).await, expected);

    // when (操作): C が別のルームに参加した後、A が再度送信
    join(&mut c, "99999", "Charlie").await;
    server.wait_for_members("99999", 1).await;
    chat(&mut a, "second", "Alice").await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut a).await["payload"]["message"], "second");
    assert_eq!(recv_json(&mut b).await["payload"]["message"], "second");
    assert_silent(&mut c).await;
}

#[tokio::test]
async fn test_root_path_accepts_websocket() {
    // テスト項目: ルートパス "/" でも WebSocket 接続できる
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let (mut ws, _) = connect_async(format!("ws://{}/", server.addr))
        .await
        .unwrap();

    // when (操作):
    join(&mut ws, "root", "Alice").await;
    server.wait_for_members("root", 1).await;
    chat(&mut ws, "hello", "Alice").await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut ws).await["payload"]["message"], "hello");
}

#[tokio::test]
async fn test_chat_before_join_is_not_relayed() {
    // テスト項目: join 前の chat は誰にも届かず、接続も切れない
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    join(&mut b, "12345", "Bob").await;
    server.wait_for_members("12345", 1).await;

    // when (操作):
    chat(&mut a, "too early", "Alice").await;

    // then (期待する結果):
    assert_silent(&mut b).await;
    join(&mut a, "12345", "Alice").await;
    server.wait_for_members("12345", 2).await;
    chat(&mut a, "now", "Alice").await;
    assert_eq!(recv_json(&mut b).await["payload"]["message"], "now");
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_open() {
    // テスト項目: 不正なフレームを送っても接続は維持される
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let mut a = server.connect().await;

    // when (操作):
    a.send(Message::text("definitely not json")).await.unwrap();
    a.send(Message::text(r#"{"payload":{}}"#)).await.unwrap();
    a.send(Message::binary(vec![1u8, 2, 3])).await.unwrap();
    send_json(&mut a, json!({"type":"typing","payload":{}})).await;
    join(&mut a, "12345", "Alice").await;
    server.wait_for_members("12345", 1).await;
    chat(&mut a, "still here", "Alice").await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut a).await["payload"]["message"], "still here");
}

#[tokio::test]
async fn test_closing_socket_removes_session() {
    // テスト項目: ソケットを閉じるとセッションが削除され、残りのメンバーは影響を受けない
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    join(&mut a, "12345", "Alice").await;
    join(&mut b, "12345", "Bob").await;
    server.wait_for_members("12345", 2).await;

    // when (操作):
    a.close(None).await.unwrap();
    server.wait_for_members("12345", 1).await;
    chat(&mut b, "alone?", "Bob").await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut b).await["payload"]["message"], "alone?");
    drop(b);
    server.wait_for_members("12345", 0).await;
    assert!(server.rooms().await.is_empty());
}

#[tokio::test]
async fn test_append_policy_duplicates_delivery() {
    // テスト項目: Append ポリシーでは 2 回 join した接続に 2 回届く
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::Append).await;
    let mut a = server.connect().await;
    join(&mut a, "12345", "Alice").await;
    join(&mut a, "12345", "Alice").await;
    server.wait_for_members("12345", 2).await;

    // when (操作):
    chat(&mut a, "echo", "Alice").await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut a).await["payload"]["message"], "echo");
    assert_eq!(recv_json(&mut a).await["payload"]["message"], "echo");
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: ヘルスチェックとルーム詳細 API が応答する
    // given (前提条件):
    let server = TestServer::start(JoinPolicy::default()).await;
    let mut a = server.connect().await;
    send_json(&mut a, json!({"type":"join","payload":{"roomId":"12345"}})).await;
    server.wait_for_members("12345", 1).await;

    // when (操作):
    let health: Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let detail: RoomDetailDto = reqwest::get(server.http_url("/api/rooms/12345"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let missing = reqwest::get(server.http_url("/api/rooms/99999"))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(health, json!({"status":"ok"}));
    assert_eq!(detail.id, "12345");
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.members[0].name, "Anonymous");
    assert!(detail.members[0].joined_at.ends_with('Z'));
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}
