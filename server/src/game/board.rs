use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 卡片索引 (0-based, 每個盤面唯一)
pub type CardIndex = usize;

/// 卡片狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// 背面朝上
    Hidden,
    /// 已翻開 (尚未配對)
    Flipped,
    /// 已配對完成
    Matched,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Hidden => "hidden",
            CardStatus::Flipped => "flipped",
            CardStatus::Matched => "matched",
        }
    }

    /// 翻開或已配對的牌對玩家可見
    pub fn is_visible(&self) -> bool {
        !matches!(self, CardStatus::Hidden)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 盤面上的一張卡片
///
/// 前端只會送出可見卡片的 icon，背面朝上的卡片 icon 為 `null`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub index: CardIndex,
    #[serde(default)]
    pub icon: Option<String>,
    pub status: CardStatus,
}

impl Card {
    #[allow(dead_code)]
    pub fn new(index: CardIndex, icon: Option<&str>, status: CardStatus) -> Self {
        Self {
            index,
            icon: icon.map(str::to_string),
            status,
        }
    }

    #[allow(dead_code)]
    pub fn hidden(index: CardIndex) -> Self {
        Self::new(index, None, CardStatus::Hidden)
    }

    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }

    pub fn is_hidden(&self) -> bool {
        self.status == CardStatus::Hidden
    }
}

/// 盤面 (依顯示順序排列)
pub type Board = Vec<Card>;

/// 尚未配對的卡片查詢表 (index -> card)
pub struct UnmatchedCards<'a> {
    by_index: HashMap<CardIndex, &'a Card>,
    /// 依盤面順序
    ordered: Vec<&'a Card>,
}

impl<'a> UnmatchedCards<'a> {
    pub fn from_board(board: &'a [Card]) -> Self {
        let ordered: Vec<&Card> = board.iter().filter(|c| !c.is_matched()).collect();
        let by_index = ordered.iter().map(|c| (c.index, *c)).collect();
        Self { by_index, ordered }
    }

    pub fn contains(&self, index: CardIndex) -> bool {
        self.by_index.contains_key(&index)
    }

    /// 背面朝上且未配對的卡片 index (盤面順序)
    pub fn hidden_indices(&self) -> Vec<CardIndex> {
        self.ordered
            .iter()
            .filter(|c| c.is_hidden())
            .map(|c| c.index)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_deserialize_null_icon() {
        let json = r#"{"index":3,"icon":null,"status":"hidden"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card, Card::hidden(3));
    }

    #[test]
    fn test_card_deserialize_missing_icon() {
        let json = r#"{"index":0,"status":"flipped"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.icon, None);
        assert_eq!(card.status, CardStatus::Flipped);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"index":0,"icon":"star","status":"burnt"}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn test_unmatched_lookup() {
        let board = vec![
            Card::new(0, Some("star"), CardStatus::Matched),
            Card::hidden(1),
            Card::new(2, Some("moon"), CardStatus::Flipped),
            Card::hidden(3),
        ];
        let unmatched = UnmatchedCards::from_board(&board);

        assert_eq!(unmatched.len(), 3);
        assert!(!unmatched.contains(0));
        assert!(unmatched.contains(2));
        // 翻開中的牌不算 hidden
        assert_eq!(unmatched.hidden_indices(), vec![1, 3]);
    }
}
