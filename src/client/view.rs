use chess::{Color, Square};

use crate::game::{MoveHint, Position};
use crate::session::NavState;

/// The board rendering widget.
pub trait BoardWidget {
    fn set_position(&mut self, position: &Position, animate: bool);

    fn set_orientation(&mut self, side: Color);

    fn resize(&mut self);

    fn highlight_move(&mut self, from: Square, to: Square);

    fn clear_highlights(&mut self);

    /// Marks legal destinations; captures get their own marker.
    fn show_hints(&mut self, hints: &[MoveHint]);

    fn clear_hints(&mut self);
}

/// Status line, chat box, move list and navigation buttons.
pub trait Presenter {
    fn set_status(&mut self, text: &str, ok: bool);

    fn append_chat(&mut self, text: &str);

    fn clear_chat(&mut self);

    fn show_moves(&mut self, moves: &[String]);

    fn set_navigation(&mut self, nav: NavState);

    /// Blocking notice, used when the server refuses a move.
    fn alert(&mut self, text: &str);
}
