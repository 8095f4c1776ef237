use chess::{Board, Color, Piece, ALL_SQUARES};

/// Convert a chess color to its display name
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

/// Single-letter side code used on the wire
pub fn color_code(color: Color) -> &'static str {
    match color {
        Color::White => "w",
        Color::Black => "b",
    }
}

/// Parse a side code, accepting the long forms too
pub fn parse_color_code(code: &str) -> Option<Color> {
    match code.trim().to_lowercase().as_str() {
        "w" | "white" => Some(Color::White),
        "b" | "black" => Some(Color::Black),
        _ => None,
    }
}

/// PGN-style result code for a win by `winner`
pub fn result_code(winner: Option<Color>) -> &'static str {
    match winner {
        Some(Color::White) => "1-0",
        Some(Color::Black) => "0-1",
        None => "1/2-1/2",
    }
}

#[derive(Default)]
struct Material {
    knights: u32,
    bishops: u32,
    heavy_or_pawns: u32,
    bishop_on_light: bool,
    bishop_on_dark: bool,
}

impl Material {
    fn minor_count(&self) -> u32 {
        self.knights + self.bishops
    }

    fn bare_king(&self) -> bool {
        self.heavy_or_pawns == 0 && self.minor_count() == 0
    }

    fn lone_minor(&self) -> bool {
        self.heavy_or_pawns == 0 && self.minor_count() == 1
    }
}

/// Check if the board has insufficient material for checkmate
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut white = Material::default();
    let mut black = Material::default();

    for square in ALL_SQUARES {
        let (piece, color) = match (board.piece_on(square), board.color_on(square)) {
            (Some(piece), Some(color)) => (piece, color),
            _ => continue,
        };
        let side = match color {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match piece {
            Piece::Knight => side.knights += 1,
            Piece::Bishop => {
                side.bishops += 1;
                if (square.get_rank().to_index() + square.get_file().to_index()) % 2 == 1 {
                    side.bishop_on_light = true;
                } else {
                    side.bishop_on_dark = true;
                }
            }
            Piece::Rook | Piece::Queen | Piece::Pawn => side.heavy_or_pawns += 1,
            Piece::King => {}
        }
    }

    // King vs King, or King and one minor piece vs King
    if (white.bare_king() || white.lone_minor()) && black.bare_king() {
        return true;
    }
    if white.bare_king() && black.lone_minor() {
        return true;
    }

    // King and Bishop vs King and Bishop with bishops on the same color
    if white.heavy_or_pawns == 0
        && black.heavy_or_pawns == 0
        && white.knights == 0
        && black.knights == 0
        && white.bishops == 1
        && black.bishops == 1
    {
        return (white.bishop_on_light && black.bishop_on_light)
            || (white.bishop_on_dark && black.bishop_on_dark);
    }

    false
}
