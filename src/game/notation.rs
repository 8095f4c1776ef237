//! Standard algebraic notation for the move list.

use chess::{Board, BoardStatus, ChessMove, File, MoveGen, Piece};

fn piece_letter(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "",
        Piece::Knight => "N",
        Piece::Bishop => "B",
        Piece::Rook => "R",
        Piece::Queen => "Q",
        Piece::King => "K",
    }
}

fn file_letter(file: File) -> char {
    (b'a' + file.to_index() as u8) as char
}

/// SAN for `chess_move` played from `board`. The move must be legal on `board`.
pub fn san(board: &Board, chess_move: ChessMove) -> String {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let piece = match board.piece_on(source) {
        Some(piece) => piece,
        None => return format!("{}{}", source, dest),
    };

    let file_distance = (source.get_file().to_index() as i32 - dest.get_file().to_index() as i32).abs();
    let mut text = if piece == Piece::King && file_distance == 2 {
        if dest.get_file().to_index() > source.get_file().to_index() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let capture = board.piece_on(dest).is_some()
            || (piece == Piece::Pawn && source.get_file() != dest.get_file());
        let mut text = String::new();
        if piece == Piece::Pawn {
            if capture {
                text.push(file_letter(source.get_file()));
            }
        } else {
            text.push_str(piece_letter(piece));
            text.push_str(&disambiguation(board, chess_move, piece));
        }
        if capture {
            text.push('x');
        }
        text.push_str(&dest.to_string());
        if let Some(promotion) = chess_move.get_promotion() {
            text.push('=');
            text.push_str(piece_letter(promotion));
        }
        text
    };

    let after = board.make_move_new(chess_move);
    if after.status() == BoardStatus::Checkmate {
        text.push('#');
    } else if after.checkers().popcnt() > 0 {
        text.push('+');
    }
    text
}

/// File, rank or full square needed to tell `chess_move` apart from moves of
/// other pieces of the same kind to the same square.
fn disambiguation(board: &Board, chess_move: ChessMove, piece: Piece) -> String {
    let source = chess_move.get_source();
    let rivals: Vec<ChessMove> = MoveGen::new_legal(board)
        .filter(|other| {
            other.get_dest() == chess_move.get_dest()
                && other.get_source() != source
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let shares_file = rivals
        .iter()
        .any(|other| other.get_source().get_file() == source.get_file());
    let shares_rank = rivals
        .iter()
        .any(|other| other.get_source().get_rank() == source.get_rank());

    if !shares_file {
        file_letter(source.get_file()).to_string()
    } else if !shares_rank {
        (source.get_rank().to_index() + 1).to_string()
    } else {
        source.to_string()
    }
}
