use super::connection::ConnectionId;
use crate::ai::{CpuOpponent, MoveOrchestrator};
use crate::protocol::{ClientMessage, Codec, ErrorCode, ServerMessage};
use log::{info, warn};
use std::io;
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;

/// Connection handler - 處理單一連線的請求與回應
///
/// 每個請求彼此獨立，只共用唯讀的 orchestrator。
pub struct ConnectionHandler {
    conn_id: ConnectionId,
    codec: Codec,
    orchestrator: Arc<MoveOrchestrator>,
}

impl ConnectionHandler {
    /// 建立新的 connection handler
    pub fn new(
        conn_id: ConnectionId,
        stream: TcpStream,
        orchestrator: Arc<MoveOrchestrator>,
    ) -> io::Result<Self> {
        let codec = Codec::new(stream)?;
        Ok(Self {
            conn_id,
            codec,
            orchestrator,
        })
    }

    /// 執行 handler 主迴圈
    pub fn run(mut self) {
        loop {
            match self.codec.read_message() {
                Ok(Some(msg)) => {
                    let reply = handle_message(self.conn_id, msg, &self.orchestrator);
                    if let Err(e) = self.codec.send_message(&reply) {
                        warn!("[HANDLER] Connection #{} send error: {}", self.conn_id, e);
                        break;
                    }
                }
                Ok(None) => {
                    // EOF - 連線關閉
                    info!("[HANDLER] Connection #{} EOF", self.conn_id);
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    // 格式錯誤的一行，回報後繼續處理下一行
                    warn!("[HANDLER] Connection #{} bad request: {}", self.conn_id, e);
                    if let Err(e) = self.codec.send_error(ErrorCode::ProtocolError, e.to_string()) {
                        warn!("[HANDLER] Connection #{} send error: {}", self.conn_id, e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("[HANDLER] Connection #{} read error: {}", self.conn_id, e);
                    break;
                }
            }
        }

        info!("[HANDLER] Connection #{} closed", self.conn_id);
    }
}

/// 處理單一請求 (不會失敗)
pub fn handle_message(
    conn_id: ConnectionId,
    msg: ClientMessage,
    orchestrator: &MoveOrchestrator,
) -> ServerMessage {
    match msg {
        ClientMessage::AiMove { state } => {
            let decision = orchestrator.choose_move(&state);
            info!(
                "[HANDLER] #{} AI_MOVE ({} cards) -> {} ({:?})",
                conn_id,
                state.board.len(),
                decision.cards,
                decision.source
            );
            ServerMessage::AiMove {
                cards: decision.cards,
                source: decision.source,
            }
        }

        ClientMessage::CpuMove { state, force_smart } => {
            let cpu = CpuOpponent::for_state(&state, force_smart);
            let cards = cpu.choose(&state, &mut rand::thread_rng());
            info!("[HANDLER] #{} CPU_MOVE -> {:?}", conn_id, cards);
            ServerMessage::CpuMove { cards }
        }

        ClientMessage::Config => ServerMessage::Config {
            api_enabled: orchestrator.is_external_enabled(),
            model: orchestrator.model().unwrap_or_default().to_string(),
        },

        ClientMessage::Ping => {
            info!("[HANDLER] #{} PING -> PONG", conn_id);
            ServerMessage::Pong
        }
    }
}

/// 在新執行緒中啟動 connection handler
pub fn spawn_handler(
    conn_id: ConnectionId,
    stream: TcpStream,
    orchestrator: Arc<MoveOrchestrator>,
) -> io::Result<()> {
    let handler = ConnectionHandler::new(conn_id, stream, orchestrator)?;

    thread::spawn(move || {
        handler.run();
    });

    Ok(())
}
