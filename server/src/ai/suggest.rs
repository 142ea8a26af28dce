//! 外部建議: 把盤面描述成 prompt，交給 LLM，再解析回傳的 JSON

use crate::game::{CardIndex, GameState, Move};
use crate::llm::{CompletionError, CompletionRequest, TextCompletion};
use log::debug;
use serde_json::Value;
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "\
You are playing a memory matching card game. Choose the next two cards to flip.
Reply strictly with a JSON object of the form {\"cards\": [i, j]} where i and j are \
distinct zero-based card indices that refer to cards which are not matched yet.
Do not include any other text.";

const TEMPERATURE: f32 = 0.0;

#[derive(Error, Debug)]
pub enum SuggestionError {
    /// 沒有 API 金鑰 (模式切換，不是真正的錯誤)
    #[error("suggestion service is not configured")]
    Unconfigured,
    #[error("suggestion transport failure: {0}")]
    Transport(#[from] CompletionError),
    #[error("invalid suggestion format: {0}")]
    InvalidFormat(String),
}

/// 向外部服務請求下一步
pub struct SuggestionRequester {
    client: Box<dyn TextCompletion>,
    max_tokens: u32,
}

impl SuggestionRequester {
    pub fn new(client: Box<dyn TextCompletion>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// 單次請求，不重試
    ///
    /// 只檢查回覆格式；index 是否存在、是否已配對、是否重複都不檢查。
    pub fn request_move(&self, state: &GameState) -> Result<Move, SuggestionError> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(state),
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
        };
        debug!("[AI] Suggestion prompt:\n{}", request.user);

        let text = self.client.complete(&request)?;
        parse_suggestion(&text)
    }
}

/// 描述盤面與記憶的 user prompt
pub fn build_user_prompt(state: &GameState) -> String {
    let visible: Vec<String> = state
        .board
        .iter()
        .filter(|c| c.status.is_visible())
        .map(|c| {
            format!(
                "{}: {} ({})",
                c.index,
                c.icon.as_deref().unwrap_or("unknown"),
                c.status
            )
        })
        .collect();

    let remembered: Vec<String> = state
        .memory
        .iter()
        .map(|(icon, indices)| {
            let indices: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
            format!("{}: {}", icon, indices.join(", "))
        })
        .collect();

    let visible_line = if visible.is_empty() {
        "No cards are currently visible.".to_string()
    } else {
        format!("Visible cards: {}", visible.join("; "))
    };

    let memory_line = if remembered.is_empty() {
        "No cards are remembered yet.".to_string()
    } else {
        format!("Remembered cards: {}", remembered.join("; "))
    };

    format!(
        "Difficulty: {}\nTotal cards: {}\n{}\n{}\nWhich two cards should be flipped next?",
        state.difficulty,
        state.board.len(),
        visible_line,
        memory_line
    )
}

/// 解析 `{"cards": [i, j]}`
pub fn parse_suggestion(text: &str) -> Result<Move, SuggestionError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| SuggestionError::InvalidFormat(format!("not JSON: {}", e)))?;

    let cards = value
        .get("cards")
        .ok_or_else(|| SuggestionError::InvalidFormat("missing `cards` field".to_string()))?;

    let items = cards
        .as_array()
        .ok_or_else(|| SuggestionError::InvalidFormat("`cards` is not an array".to_string()))?;

    match items.as_slice() {
        [first, second] => Ok(Move::new(coerce_index(first)?, coerce_index(second)?)),
        _ => Err(SuggestionError::InvalidFormat(format!(
            "expected 2 indices, got {}",
            items.len()
        ))),
    }
}

/// 整數、有限浮點數 (向零截斷) 或可解析為整數的字串
fn coerce_index(value: &Value) -> Result<CardIndex, SuggestionError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|i| CardIndex::try_from(i).ok())
        .ok_or_else(|| SuggestionError::InvalidFormat(format!("not a card index: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Card, CardStatus};
    use std::sync::{Arc, Mutex};

    struct CannedCompletion {
        reply: Result<String, String>,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl CannedCompletion {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TextCompletion for CannedCompletion {
        fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(CompletionError::Other)
        }

        fn model(&self) -> &str {
            "canned"
        }
    }

    fn sample_state() -> GameState {
        let mut state = GameState {
            board: vec![
                Card::new(0, Some("star"), CardStatus::Matched),
                Card::new(1, Some("star"), CardStatus::Matched),
                Card::hidden(2),
                Card::new(3, Some("moon"), CardStatus::Flipped),
            ],
            difficulty: "medium".to_string(),
            ..GameState::default()
        };
        state.memory.insert("star".to_string(), vec![0, 1]);
        state.memory.insert("moon".to_string(), vec![3]);
        state
    }

    #[test]
    fn test_user_prompt() {
        let prompt = build_user_prompt(&sample_state());
        assert!(prompt.contains("Difficulty: medium"));
        assert!(prompt.contains("Total cards: 4"));
        assert!(prompt.contains("Visible cards: 0: star (matched); 1: star (matched); 3: moon (flipped)"));
        assert!(prompt.contains("Remembered cards: star: 0, 1; moon: 3"));
        // hidden 卡片不出現
        assert!(!prompt.contains("(hidden)"));
    }

    #[test]
    fn test_user_prompt_empty_state() {
        let prompt = build_user_prompt(&GameState::default());
        assert!(prompt.contains("Total cards: 0"));
        assert!(prompt.contains("No cards are currently visible."));
        assert!(prompt.contains("No cards are remembered yet."));
    }

    #[test]
    fn test_parse_valid() {
        let result = parse_suggestion(r#"{"cards": [3, 1]}"#).unwrap();
        assert_eq!(result, Move::new(3, 1));
    }

    #[test]
    fn test_parse_with_whitespace() {
        let result = parse_suggestion("\n  {\"cards\": [0, 5]}  \n").unwrap();
        assert_eq!(result, Move::new(0, 5));
    }

    #[test]
    fn test_parse_coerces_strings_and_floats() {
        assert_eq!(
            parse_suggestion(r#"{"cards": ["4", " 2 "]}"#).unwrap(),
            Move::new(4, 2)
        );
        assert_eq!(
            parse_suggestion(r#"{"cards": [4.0, 2.9]}"#).unwrap(),
            Move::new(4, 2)
        );
    }

    #[test]
    fn test_parse_does_not_check_board() {
        // 重複或超出範圍的 index 照樣通過
        assert_eq!(
            parse_suggestion(r#"{"cards": [99, 99]}"#).unwrap(),
            Move::new(99, 99)
        );
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let cases = [
            "Sure! I pick cards 1 and 2.",
            "```json\n{\"cards\": [1, 2]}\n```",
            r#"{"pair": [1, 2]}"#,
            r#"{"cards": "1,2"}"#,
            r#"{"cards": [1]}"#,
            r#"{"cards": [1, 2, 3]}"#,
            r#"{"cards": [1, "two"]}"#,
            r#"{"cards": [1, null]}"#,
            r#"{"cards": [1, true]}"#,
            r#"{"cards": [-1, 2]}"#,
            r#"[1, 2]"#,
        ];
        for text in cases {
            assert!(
                matches!(parse_suggestion(text), Err(SuggestionError::InvalidFormat(_))),
                "should reject: {}",
                text
            );
        }
    }

    #[test]
    fn test_request_move() {
        let stub = CannedCompletion::new(Ok(r#"{"cards": [2, 3]}"#));
        let seen = stub.seen.clone();
        let requester = SuggestionRequester::new(Box::new(stub), 16);

        let result = requester.request_move(&sample_state()).unwrap();
        assert_eq!(result, Move::new(2, 3));
        assert_eq!(requester.model(), "canned");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, 0.0);
        assert_eq!(seen[0].max_tokens, 16);
        assert_eq!(seen[0].system, SYSTEM_PROMPT);
        assert_eq!(seen[0].user, build_user_prompt(&sample_state()));
    }

    #[test]
    fn test_malformed_reply() {
        let stub = CannedCompletion::new(Ok("I would flip 2 and 3"));
        let requester = SuggestionRequester::new(Box::new(stub), 20);

        let result = requester.request_move(&sample_state());
        assert!(matches!(result, Err(SuggestionError::InvalidFormat(_))));
    }

    #[test]
    fn test_transport_error() {
        let stub = CannedCompletion::new(Err("connection refused"));
        let requester = SuggestionRequester::new(Box::new(stub), 20);

        let result = requester.request_move(&sample_state());
        assert!(matches!(result, Err(SuggestionError::Transport(_))));
    }
}
