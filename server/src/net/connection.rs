use std::sync::atomic::{AtomicU64, Ordering};

/// 連線 ID 類型
pub type ConnectionId = u64;

/// 全域連線 ID 計數器
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 產生新的連線 ID
pub fn next_connection_id() -> ConnectionId {
    CONNECTION_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}
