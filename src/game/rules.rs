use chess::{BoardStatus, ChessMove, Color, MoveGen, Piece, Rank, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game::notation::san;
use crate::game::position::Position;
use crate::game::utils::has_insufficient_material;

/// A move as produced by a drag gesture or the remote authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }

    /// Square-pair notation, with a promotion suffix when one is set.
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, promotion_letter(piece)),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_lowercase();
        if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
            return Err(format!("Invalid move format: {}", text));
        }
        let from = Square::from_str(&text[0..2]).map_err(|_| format!("Invalid square: {}", &text[0..2]))?;
        let to = Square::from_str(&text[2..4]).map_err(|_| format!("Invalid square: {}", &text[2..4]))?;
        let promotion = match text.get(4..5) {
            Some(letter) => Some(
                Promotion::from_letter(letter)
                    .ok_or_else(|| format!("Invalid promotion: {}", letter))?
                    .piece(),
            ),
            None => None,
        };
        Ok(Self { from, to, promotion })
    }
}

/// Piece a pawn becomes when it reaches the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Promotion {
    #[default]
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "n")]
    Knight,
}

impl Promotion {
    pub fn piece(&self) -> Piece {
        match self {
            Self::Queen => Piece::Queen,
            Self::Rook => Piece::Rook,
            Self::Bishop => Piece::Bishop,
            Self::Knight => Piece::Knight,
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "q" => Some(Self::Queen),
            "r" => Some(Self::Rook),
            "b" => Some(Self::Bishop),
            "n" => Some(Self::Knight),
            _ => None,
        }
    }
}

fn promotion_letter(piece: Piece) -> char {
    match piece {
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        _ => 'q',
    }
}

/// A legal destination for the piece being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveHint {
    pub to: Square,
    pub capture: bool,
    pub en_passant: bool,
}

impl MoveHint {
    /// Whether the widget should paint this as a capture marker.
    pub fn is_capture(&self) -> bool {
        self.capture || self.en_passant
    }
}

/// Result of a successful `RulesEngine::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    pub san: String,
    pub capture: bool,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Ongoing,
    /// `winner` is the side that is not to move.
    Checkmate { winner: Color },
    Draw(DrawReason),
}

/// The rules engine the session delegates legality and game-end decisions to.
pub trait RulesEngine {
    fn load(&mut self, position: &Position);

    fn reset(&mut self) {
        self.load(&Position::default());
    }

    fn turn(&self) -> Color;

    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;

    /// Legal destinations for the piece on `square`.
    fn moves_from(&self, square: Square) -> Vec<MoveHint>;

    /// Plays `mv` if legal. Returns `None` and leaves the state untouched otherwise.
    fn apply(&mut self, mv: &Move) -> Option<AppliedMove>;

    fn status(&self) -> TerminalStatus;

    fn position(&self) -> Position;
}

/// `RulesEngine` on top of the `chess` crate.
#[derive(Debug, Clone, Default)]
pub struct ChessRules {
    position: Position,
}

impl ChessRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Position) -> Self {
        Self { position }
    }

    /// Builds the `chess` move for `mv`, dropping a promotion the move cannot carry.
    fn to_chess_move(&self, mv: &Move) -> ChessMove {
        let board = self.position.board();
        let promotes = board.piece_on(mv.from) == Some(Piece::Pawn)
            && matches!(mv.to.get_rank(), Rank::First | Rank::Eighth);
        let promotion = if promotes {
            Some(mv.promotion.unwrap_or(Piece::Queen))
        } else {
            None
        };
        ChessMove::new(mv.from, mv.to, promotion)
    }
}

impl RulesEngine for ChessRules {
    fn load(&mut self, position: &Position) {
        self.position = *position;
    }

    fn turn(&self) -> Color {
        self.position.side_to_move()
    }

    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let board = self.position.board();
        match (board.piece_on(square), board.color_on(square)) {
            (Some(piece), Some(color)) => Some((piece, color)),
            _ => None,
        }
    }

    fn moves_from(&self, square: Square) -> Vec<MoveHint> {
        let board = self.position.board();
        let mut hints: Vec<MoveHint> = Vec::new();
        for chess_move in MoveGen::new_legal(board) {
            if chess_move.get_source() != square {
                continue;
            }
            // Under-promotions share a destination with the queen promotion.
            if hints.iter().any(|hint| hint.to == chess_move.get_dest()) {
                continue;
            }
            let capture = board.piece_on(chess_move.get_dest()).is_some();
            let en_passant = board.piece_on(square) == Some(Piece::Pawn)
                && !capture
                && square.get_file() != chess_move.get_dest().get_file();
            hints.push(MoveHint {
                to: chess_move.get_dest(),
                capture,
                en_passant,
            });
        }
        hints
    }

    fn apply(&mut self, mv: &Move) -> Option<AppliedMove> {
        let chess_move = self.to_chess_move(mv);
        let board = *self.position.board();
        if !board.legal(chess_move) {
            return None;
        }

        let capture = board.piece_on(mv.to).is_some()
            || (board.piece_on(mv.from) == Some(Piece::Pawn) && mv.from.get_file() != mv.to.get_file());
        let irreversible = capture || board.piece_on(mv.from) == Some(Piece::Pawn);
        let notation = san(&board, chess_move);

        let next = self.position.successor(board.make_move_new(chess_move), irreversible);
        self.position = next;

        Some(AppliedMove {
            mv: Move {
                from: mv.from,
                to: mv.to,
                promotion: chess_move.get_promotion(),
            },
            san: notation,
            capture,
            position: next,
        })
    }

    fn status(&self) -> TerminalStatus {
        let board = self.position.board();
        match board.status() {
            BoardStatus::Checkmate => TerminalStatus::Checkmate {
                winner: !board.side_to_move(),
            },
            BoardStatus::Stalemate => TerminalStatus::Draw(DrawReason::Stalemate),
            BoardStatus::Ongoing => {
                if has_insufficient_material(board) {
                    TerminalStatus::Draw(DrawReason::InsufficientMaterial)
                } else if self.position.halfmove_clock() >= 100 {
                    TerminalStatus::Draw(DrawReason::FiftyMoveRule)
                } else {
                    TerminalStatus::Ongoing
                }
            }
        }
    }

    fn position(&self) -> Position {
        self.position
    }
}
