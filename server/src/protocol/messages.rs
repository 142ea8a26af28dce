use crate::game::{deserialize_state_lenient, GameState, Move, MoveSource};
use serde::{Deserialize, Serialize};

/// 錯誤代碼
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ProtocolError,
}

/// 客戶端到伺服器的訊息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// 請求 AI 下一步 (等同 `POST /api/ai-move`)
    ///
    /// state 缺少或格式錯誤時視為空盤面。
    #[serde(rename = "AI_MOVE")]
    AiMove {
        #[serde(default, deserialize_with = "deserialize_state_lenient")]
        state: GameState,
    },

    /// 請求 CPU 對手下一步
    #[serde(rename = "CPU_MOVE")]
    CpuMove {
        #[serde(default, deserialize_with = "deserialize_state_lenient")]
        state: GameState,
        #[serde(default)]
        force_smart: bool,
    },

    /// 查詢外部建議服務是否啟用
    #[serde(rename = "CONFIG")]
    Config,

    /// Ping (用於測試)
    #[serde(rename = "PING")]
    Ping,
}

/// 伺服器到客戶端的訊息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// AI 選牌結果
    #[serde(rename = "AI_MOVE")]
    AiMove { cards: Move, source: MoveSource },

    /// CPU 選牌結果 (沒有可翻的牌時為 null)
    #[serde(rename = "CPU_MOVE")]
    CpuMove { cards: Option<Move> },

    /// 服務設定
    #[serde(rename = "CONFIG")]
    Config { api_enabled: bool, model: String },

    /// 錯誤訊息
    #[serde(rename = "ERROR")]
    Error { code: ErrorCode, message: String },

    /// Pong (用於測試)
    #[serde(rename = "PONG")]
    Pong,
}
