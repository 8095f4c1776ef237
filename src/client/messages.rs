use actix::Message;
use chess::{Color, Square};

use crate::game::Position;
use crate::session::{Mode, Nav, Outcome};

/// Start a new game with the human playing the given side
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct StartGame(pub Color);

/// The user picked up the piece on `square`; answers whether the drag may proceed
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "bool")]
pub struct DragStart {
    pub square: Square,
}

/// The user dropped a dragged piece
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "DropOutcome")]
pub struct DropPiece {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The widget returns the piece to its source square.
    Snapback,
    Accepted { san: String },
}

/// The drop animation finished
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct SnapEnd;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Navigate(pub Nav);

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Resign;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Resize;

/// Read-only view of the session
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub human: Color,
    pub timeline_len: usize,
    pub cursor: usize,
    pub pending: bool,
    pub displayed: Position,
    pub live: Position,
    pub moves: Vec<String>,
    pub outcome: Option<Outcome>,
}
