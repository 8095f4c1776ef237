use chess::{Board, Color};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Full snapshot of the board at one point in a game.
///
/// The `chess` board carries placement, side to move, castling rights and the
/// en passant square; the move counters are tracked here because the board
/// type does not keep them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    pub fn new(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number: fullmove_number.max(1),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Same placement, side, castling and en passant, ignoring the counters.
    pub fn same_board(&self, other: &Position) -> bool {
        self.board == other.board
    }

    /// Position reached by playing a move that produced `board`.
    pub fn successor(&self, board: Board, irreversible: bool) -> Position {
        let halfmove_clock = if irreversible { 0 } else { self.halfmove_clock.saturating_add(1) };
        let fullmove_number = if self.side_to_move() == Color::Black {
            self.fullmove_number.saturating_add(1)
        } else {
            self.fullmove_number
        };
        Position::new(board, halfmove_clock, fullmove_number)
    }

    pub fn fen(&self) -> String {
        let board_fen = self.board.to_string();
        let fields: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(Board::default(), 0, 1)
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(GameError::InvalidPosition(fen.to_string()));
        }
        let board = Board::from_str(&fields[..4].join(" "))
            .map_err(|_| GameError::InvalidPosition(fen.to_string()))?;
        let parse_counter = |field: Option<&&str>, default: u32| -> Result<u32, GameError> {
            match field {
                Some(text) => text
                    .parse::<u32>()
                    .map_err(|_| GameError::InvalidPosition(fen.to_string())),
                None => Ok(default),
            }
        };
        let halfmove_clock = parse_counter(fields.get(4), 0)?;
        let fullmove_number = parse_counter(fields.get(5), 1)?;
        Ok(Position::new(board, halfmove_clock, fullmove_number))
    }
}

impl TryFrom<String> for Position {
    type Error = GameError;

    fn try_from(fen: String) -> Result<Self, Self::Error> {
        fen.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.fen()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())
    }
}
