//! CPU 對手
//!
//! 依難度決定「記得」已知牌的機率，記不住時就隨機翻背面朝上的牌。

use crate::game::{difficulty_for_card_count, CardIndex, GameState, Move, UnmatchedCards};
use rand::seq::SliceRandom;
use rand::Rng;

/// 依難度決定運用記憶的機率
pub fn knowledge_chance(difficulty: &str) -> f64 {
    match difficulty.trim().to_lowercase().as_str() {
        "easy" => 0.4,
        "medium" => 0.7,
        _ => 1.0,
    }
}

/// 難度可調的 CPU 對手
#[derive(Debug, Clone, PartialEq)]
pub struct CpuOpponent {
    knowledge_chance: f64,
}

impl CpuOpponent {
    pub fn new(knowledge_chance: f64) -> Self {
        Self {
            knowledge_chance: knowledge_chance.clamp(0.0, 1.0),
        }
    }

    /// 依 state 的難度建立；難度未填時以卡片數推算
    pub fn for_state(state: &GameState, force_smart: bool) -> Self {
        if force_smart {
            return Self::new(1.0);
        }
        let difficulty = if state.difficulty.trim().is_empty() {
            difficulty_for_card_count(state.board.len())
        } else {
            state.difficulty.as_str()
        };
        Self::new(knowledge_chance(difficulty))
    }

    /// 選出下一步；沒有兩張可翻的牌時回傳 `None`
    pub fn choose<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Option<Move> {
        let unmatched = UnmatchedCards::from_board(&state.board);
        let hidden = unmatched.hidden_indices();

        // 每個 icon 仍未配對的已知位置 (記憶順序)
        let known: Vec<Vec<CardIndex>> = state
            .memory
            .values()
            .map(|indices| {
                let mut remaining: Vec<CardIndex> = Vec::new();
                for &i in indices {
                    if unmatched.contains(i) && !remaining.contains(&i) {
                        remaining.push(i);
                    }
                }
                remaining
            })
            .collect();

        let pairs: Vec<Move> = known
            .iter()
            .filter(|cards| cards.len() >= 2)
            .map(|cards| Move::new(cards[0], cards[1]))
            .collect();

        if !pairs.is_empty() && self.recalls(rng) {
            return pairs.choose(rng).copied();
        }

        let singles: Vec<CardIndex> = known
            .iter()
            .filter(|cards| cards.len() == 1)
            .map(|cards| cards[0])
            .collect();

        let mut first = None;
        if !singles.is_empty() && self.recalls(rng) {
            first = singles.choose(rng).copied();
        }
        let first = match first {
            Some(index) => index,
            None => *hidden.choose(rng)?,
        };

        let partners: Vec<CardIndex> = known
            .iter()
            .filter(|cards| cards.contains(&first))
            .flat_map(|cards| cards.iter().copied())
            .filter(|&i| i != first)
            .collect();

        if !partners.is_empty() && self.recalls(rng) {
            if let Some(&second) = partners.choose(rng) {
                return Some(Move::new(first, second));
            }
        }

        let others: Vec<CardIndex> = hidden.into_iter().filter(|&i| i != first).collect();
        others.choose(rng).map(|&second| Move::new(first, second))
    }

    fn recalls<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.knowledge_chance)
    }
}
