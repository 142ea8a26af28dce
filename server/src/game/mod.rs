pub mod board;
pub mod state;

#[allow(unused_imports)]
pub use board::{Board, Card, CardIndex, CardStatus, UnmatchedCards};
pub use state::{
    deserialize_state_lenient, difficulty_for_card_count, GameState, Memory, Move, MoveDecision,
    MoveSource,
};
