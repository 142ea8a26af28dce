//! Fallback 選牌策略
//!
//! 不依賴任何外部服務，只根據盤面與記憶決定下一步，保證一定有結果。

use crate::game::{CardIndex, GameState, Memory, Move, UnmatchedCards};
use log::debug;

/// 沒有任何可選卡片時的最後猜測
const DEGENERATE_MOVE: Move = Move([0, 1]);

/// 確定性 fallback 策略
///
/// ## 優先順序
/// 1. 記憶中已知的一對 (兩張都未配對)
/// 2. 只看過一次的 icon + 一張背面朝上的牌
/// 3. 兩張背面朝上的牌
///
/// 難度標籤不影響結果。
#[derive(Debug, Clone, Default)]
pub struct FallbackSelector;

impl FallbackSelector {
    pub fn new() -> Self {
        Self
    }

    /// 計算 fallback 步 (total function，不會失敗)
    pub fn select(&self, state: &GameState) -> Move {
        let unmatched = UnmatchedCards::from_board(&state.board);

        if let Some(pair) = Self::find_known_pair(&state.memory, &unmatched) {
            return pair;
        }

        let singles = Self::find_singles(&state.memory, &unmatched);
        let hidden = unmatched.hidden_indices();

        let first = match singles.first().or_else(|| hidden.first()) {
            Some(&index) => index,
            None => {
                debug!(
                    "[AI] No selectable card ({} unmatched), guessing {}",
                    unmatched.len(),
                    DEGENERATE_MOVE
                );
                return DEGENERATE_MOVE;
            }
        };

        let second = hidden.iter().copied().find(|&i| i != first).unwrap_or(first);

        let result = Move::new(first, second);
        if result.is_duplicate() {
            debug!("[AI] Only one selectable card, forced duplicate {}", result);
        }
        result
    }

    /// 記憶中兩張都還沒配對的 icon，取該 icon 最先記錄的兩張
    fn find_known_pair(memory: &Memory, unmatched: &UnmatchedCards) -> Option<Move> {
        memory.values().find_map(|indices| {
            let remaining = distinct_unmatched(indices, unmatched);
            match remaining.as_slice() {
                [first, second, ..] => Some(Move::new(*first, *second)),
                _ => None,
            }
        })
    }

    /// 只看過一次且仍未配對的卡片 (記憶順序)
    fn find_singles(memory: &Memory, unmatched: &UnmatchedCards) -> Vec<CardIndex> {
        memory
            .values()
            .filter_map(|indices| match distinct(indices).as_slice() {
                [only] if unmatched.contains(*only) => Some(*only),
                _ => None,
            })
            .collect()
    }
}

/// 去除重複 index，保留原始順序
fn distinct(indices: &[CardIndex]) -> Vec<CardIndex> {
    let mut seen = Vec::with_capacity(indices.len());
    for &index in indices {
        if !seen.contains(&index) {
            seen.push(index);
        }
    }
    seen
}

fn distinct_unmatched(indices: &[CardIndex], unmatched: &UnmatchedCards) -> Vec<CardIndex> {
    distinct(indices)
        .into_iter()
        .filter(|&i| unmatched.contains(i))
        .collect()
}
