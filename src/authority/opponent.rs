use rand::seq::IteratorRandom;
use std::collections::VecDeque;

use crate::game::{ChessRules, Move, RulesEngine};

/// Chooses the server side's reply.
pub trait Opponent {
    fn choose(&mut self, rules: &ChessRules) -> Option<Move>;
}

/// Plays a uniformly random legal move.
#[derive(Debug, Default)]
pub struct RandomOpponent;

impl Opponent for RandomOpponent {
    fn choose(&mut self, rules: &ChessRules) -> Option<Move> {
        let board = *rules.position().board();
        chess::MoveGen::new_legal(&board)
            .choose(&mut rand::thread_rng())
            .map(|chess_move| {
                let mv = Move::new(chess_move.get_source(), chess_move.get_dest());
                match chess_move.get_promotion() {
                    Some(piece) => mv.with_promotion(piece),
                    None => mv,
                }
            })
    }
}

/// Replays a fixed list of moves, then falls back to the first legal move.
#[derive(Debug, Default)]
pub struct ScriptedOpponent {
    script: VecDeque<Move>,
}

impl ScriptedOpponent {
    pub fn new(moves: &[&str]) -> Result<Self, String> {
        let script = moves
            .iter()
            .map(|text| text.parse::<Move>())
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { script })
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(&mut self, rules: &ChessRules) -> Option<Move> {
        if let Some(mv) = self.script.pop_front() {
            return Some(mv);
        }
        let board = *rules.position().board();
        chess::MoveGen::new_legal(&board)
            .next()
            .map(|chess_move| Move::new(chess_move.get_source(), chess_move.get_dest()))
    }
}
