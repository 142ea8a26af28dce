//! OpenAI 相容的 chat completion client (blocking)

use super::client::{CompletionError, CompletionRequest, TextCompletion};
use super::config::SuggestionConfig;
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completion client
///
/// 每次呼叫只送出一個請求，不重試；逾時由 reqwest client 控制。
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    /// 依設定建立 client；沒有 API 金鑰時回傳 `None`
    pub fn from_config(config: &SuggestionConfig) -> Result<Option<Self>, CompletionError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => return Ok(None),
        };

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Some(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url),
            api_key,
            model: config.model.clone(),
        }))
    }
}

fn build_request_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.user,
            },
        ],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        n: 1,
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

impl TextCompletion for ChatCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = build_request_body(&self.model, request);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json()?;
        let text = first_choice_text(parsed)?;
        debug!("[LLM] {} replied: {}", self.model, text);
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
