use super::board::{Board, CardIndex};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 記憶: icon -> 曾看過該 icon 的卡片 index
///
/// 必須保留插入順序，fallback 策略依此順序挑牌。
pub type Memory = IndexMap<String, Vec<CardIndex>>;

/// 一次選牌請求的完整輸入 (每次呼叫獨立，不跨請求保留)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub board: Board,
    #[serde(default)]
    pub memory: Memory,
    /// 難度標籤 (自由字串，只用於 prompt 與 CPU 對手)
    #[serde(default)]
    pub difficulty: String,
}

impl GameState {
    /// 寬鬆解析: 缺少或格式錯誤的 state 一律視為空盤面
    pub fn from_value_lenient(value: Option<serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(value) => match serde_json::from_value(value) {
                Ok(state) => state,
                Err(e) => {
                    warn!("[PROTO] Invalid state payload, using empty state: {}", e);
                    Self::default()
                }
            },
        }
    }
}

/// 供 `#[serde(deserialize_with)]` 使用的寬鬆 state 解析
pub fn deserialize_state_lenient<'de, D>(deserializer: D) -> Result<GameState, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(GameState::from_value_lenient(value))
}

/// 一步: 要翻開的兩張牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(pub [CardIndex; 2]);

impl Move {
    pub fn new(first: CardIndex, second: CardIndex) -> Self {
        Self([first, second])
    }

    pub fn first(&self) -> CardIndex {
        self.0[0]
    }

    pub fn second(&self) -> CardIndex {
        self.0[1]
    }

    /// 兩張牌相同 (只剩一張可選時的退化結果)
    pub fn is_duplicate(&self) -> bool {
        self.0[0] == self.0[1]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first(), self.second())
    }
}

/// 選牌結果的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    /// 外部語言模型建議
    External,
    /// 本地 fallback 策略
    Fallback,
}

/// Orchestrator 的輸出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDecision {
    pub cards: Move,
    pub source: MoveSource,
}

impl MoveDecision {
    pub fn external(cards: Move) -> Self {
        Self {
            cards,
            source: MoveSource::External,
        }
    }

    pub fn fallback(cards: Move) -> Self {
        Self {
            cards,
            source: MoveSource::Fallback,
        }
    }
}

/// 依卡片總數推算難度 (前端的盤面大小對應)
pub fn difficulty_for_card_count(card_count: usize) -> &'static str {
    match card_count {
        12 => "easy",
        18 => "medium",
        _ => "hard",
    }
}
