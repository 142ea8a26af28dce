//! 選牌流程: 先問外部服務，失敗就改用 fallback

use super::fallback::FallbackSelector;
use super::suggest::{SuggestionError, SuggestionRequester};
use crate::game::{GameState, Move, MoveDecision};
use crate::llm::{ChatCompletionClient, CompletionError, SuggestionConfig};
use log::{debug, info, warn};

/// 選牌入口 (唯一對外提供給傳輸層的操作)
///
/// 建立後唯讀，可用 `Arc` 在多個連線執行緒間共用。
pub struct MoveOrchestrator {
    requester: Option<SuggestionRequester>,
    fallback: FallbackSelector,
}

impl MoveOrchestrator {
    pub fn new(requester: Option<SuggestionRequester>) -> Self {
        Self {
            requester,
            fallback: FallbackSelector::new(),
        }
    }

    /// 只使用 fallback (未設定 API 金鑰)
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    /// 依設定建立；沒有金鑰時停用外部建議
    pub fn from_config(config: &SuggestionConfig) -> Result<Self, CompletionError> {
        let requester = ChatCompletionClient::from_config(config)?
            .map(|client| SuggestionRequester::new(Box::new(client), config.max_tokens));

        match &requester {
            Some(r) => info!("[AI] External suggestions enabled (model: {})", r.model()),
            None => info!("[AI] No API key configured, using fallback strategy only"),
        }

        Ok(Self::new(requester))
    }

    pub fn is_external_enabled(&self) -> bool {
        self.requester.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.requester.as_ref().map(|r| r.model())
    }

    /// 決定下一步 (不會失敗)
    pub fn choose_move(&self, state: &GameState) -> MoveDecision {
        match self.request_external(state) {
            Ok(cards) => {
                debug!("[AI] External suggestion {}", cards);
                MoveDecision::external(cards)
            }
            Err(SuggestionError::Unconfigured) => MoveDecision::fallback(self.fallback_move(state)),
            Err(e) => {
                warn!("[AI] Suggestion failed, using fallback strategy: {}", e);
                MoveDecision::fallback(self.fallback_move(state))
            }
        }
    }

    pub fn fallback_move(&self, state: &GameState) -> Move {
        self.fallback.select(state)
    }

    fn request_external(&self, state: &GameState) -> Result<Move, SuggestionError> {
        match &self.requester {
            Some(requester) => requester.request_move(state),
            None => Err(SuggestionError::Unconfigured),
        }
    }
}
