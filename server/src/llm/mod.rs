//! LLM 模組 - 外部文字生成服務
//!
//! - TextCompletion: 抽象的 completion 能力 (可替換為測試 stub)
//! - ChatCompletionClient: OpenAI 相容的實作
//! - SuggestionConfig: 金鑰與模型設定

pub mod client;
pub mod config;
pub mod openai;

pub use client::{CompletionError, CompletionRequest, TextCompletion};
pub use config::SuggestionConfig;
pub use openai::ChatCompletionClient;
