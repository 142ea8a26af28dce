mod ai;
mod game;
mod llm;
mod net;
mod protocol;

use ai::MoveOrchestrator;
use llm::SuggestionConfig;
use log::{error, info, warn};
use net::{next_connection_id, spawn_handler};
use std::env;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

const DEFAULT_PORT: u16 = 8888;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = parse_port_from_args().unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    // 金鑰與模型只在啟動時讀取一次
    let config = SuggestionConfig::from_env();
    info!(
        "[SERVER] Suggestion model: {} (api key {})",
        config.model,
        if config.is_enabled() { "set" } else { "missing" }
    );
    let orchestrator = match MoveOrchestrator::from_config(&config) {
        Ok(o) => o,
        Err(e) => {
            warn!(
                "[SERVER] Failed to build suggestion client: {} (continuing with fallback only)",
                e
            );
            MoveOrchestrator::fallback_only()
        }
    };

    let listener = match net::create_tcp_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            error!("[SERVER] Failed to create listener: {}", e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(local_addr) => info!("[SERVER] Listening on {}", local_addr),
        Err(e) => warn!("[SERVER] Listening (local address unavailable: {})", e),
    }

    accept_loop(listener, Arc::new(orchestrator));
}

fn accept_loop(listener: TcpListener, orchestrator: Arc<MoveOrchestrator>) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let peer_addr = stream
                    .peer_addr()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                let conn_id = next_connection_id();

                info!("[ACCEPT] New connection #{} from {}", conn_id, peer_addr);

                if let Err(e) = spawn_handler(conn_id, stream, orchestrator.clone()) {
                    warn!("[ACCEPT] Failed to spawn handler for #{}: {}", conn_id, e);
                }
            }
            Err(e) => {
                error!("[ACCEPT] Accept error: {}", e);
            }
        }
    }
}

fn parse_port_from_args() -> Option<u16> {
    let args: Vec<String> = env::args().collect();
    args.windows(2)
        .find(|pair| pair[0] == "--port")
        .and_then(|pair| pair[1].parse().ok())
}
