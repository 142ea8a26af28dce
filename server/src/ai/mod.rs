//! AI 模組 - 翻牌決策
//!
//! 此模組提供記憶翻牌遊戲的選牌功能：
//! - MoveOrchestrator: 先問外部 LLM，失敗時改用 fallback
//! - SuggestionRequester: 建立 prompt 並解析 LLM 回覆
//! - FallbackSelector: 確定性策略，保證一定有結果
//! - CpuOpponent: 依難度調整記憶力的 CPU 對手

mod cpu;
mod fallback;
mod orchestrator;
mod suggest;

pub use cpu::CpuOpponent;
pub use orchestrator::MoveOrchestrator;
#[allow(unused_imports)]
pub use fallback::FallbackSelector;
#[allow(unused_imports)]
pub use suggest::{SuggestionError, SuggestionRequester};
