//! 文字生成服務的抽象介面

use thiserror::Error;

/// 單次 completion 請求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// system 指令
    pub system: String,
    /// user 指令
    pub user: String,
    pub temperature: f32,
    /// 輸出 token 上限
    pub max_tokens: u32,
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response contained no choices")]
    EmptyResponse,
    /// 其他錯誤 (測試 stub 使用)
    #[allow(dead_code)]
    #[error("{0}")]
    Other(String),
}

/// 文字生成能力: prompt 進，文字或錯誤出
///
/// 實際服務與測試 stub 都實作此 trait。
pub trait TextCompletion: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// 使用中的模型名稱 (記錄用)
    fn model(&self) -> &str;
}
