pub mod notation;
pub mod position;
pub mod rules;
pub mod utils;

pub use position::Position;
pub use rules::{
    AppliedMove, ChessRules, DrawReason, Move, MoveHint, Promotion, RulesEngine, TerminalStatus,
};
