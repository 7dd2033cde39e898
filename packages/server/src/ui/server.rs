//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
};

use super::{
    dispatcher::Dispatcher,
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Error type returned by [`Server::run`] and [`Server::serve`]
pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     disconnect_participant_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 5050).await?;
/// ```
pub struct Server {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            join_room_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Build the axum router with all endpoints
    pub fn router(self) -> Router {
        let dispatcher = Arc::new(Dispatcher::new(
            self.join_room_usecase,
            self.send_message_usecase,
            self.disconnect_participant_usecase,
        ));
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            dispatcher,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5050)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("Heya relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
