//! Room-scoped WebSocket chat relay.
//!
//! Clients send `join` to enter a room and `chat` to talk in it; every chat is
//! relayed to all members of the sender's room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin heya-server
//! cargo run --bin heya-server -- --host 0.0.0.0 --port 5050 --join-policy append
//! ```

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use heya_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinPolicy, JoinRoomUseCase, SendMessageUseCase,
    },
};
use heya_shared::logger::setup_logger;

/// How to treat a second `join` on the same connection
#[derive(Debug, Clone, Copy, ValueEnum)]
enum JoinPolicyArg {
    /// Leave previous rooms; one session per connection
    Replace,
    /// Keep previous sessions; duplicate joins mean duplicate delivery
    Append,
}

impl From<JoinPolicyArg> for JoinPolicy {
    fn from(arg: JoinPolicyArg) -> Self {
        match arg {
            JoinPolicyArg::Replace => JoinPolicy::Replace,
            JoinPolicyArg::Append => JoinPolicy::Append,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "heya-server")]
#[command(about = "Room-scoped WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5050")]
    port: u16,

    /// Policy for repeated joins on one connection
    #[arg(long, value_enum, default_value_t = JoinPolicyArg::Replace)]
    join_policy: JoinPolicyArg,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory session registry)
    let repository = Arc::new(InMemorySessionRepository::new());

    // 2. Create MessagePusher (per-connection outbound queues)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_policy = JoinPolicy::from(args.join_policy);
    tracing::info!("Join policy: {:?}", join_policy);
    let connect_participant_usecase =
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone(), join_policy));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        join_room_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
