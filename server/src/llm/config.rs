use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_TOKENS: u32 = 20;

/// 外部建議服務設定 (啟動時讀取一次)
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionConfig {
    /// API 金鑰，未設定時停用外部建議
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// 單次請求逾時
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl SuggestionConfig {
    /// 從環境變數讀取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 從任意 key 查詢來源建立設定 (測試不需動到 process 環境變數)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_key: non_blank("OPENAI_API_KEY"),
            model: non_blank("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                non_blank("AI_MOVE_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            max_tokens: non_blank("AI_MOVE_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }

    /// 是否有可用的 API 金鑰
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SuggestionConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SuggestionConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = SuggestionConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_tokens, 20);
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("AI_MOVE_TIMEOUT_SECS", "3"),
            ("AI_MOVE_MAX_TOKENS", "not a number"),
        ]);
        assert!(config.is_enabled());
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_tokens, 20);
    }
}
