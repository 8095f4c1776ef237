use chess::Color;

use crate::game::utils::{color_to_string, result_code};
use crate::game::{DrawReason, Move, Position};

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No game, or the server refused to start one.
    #[default]
    Idle,
    /// New game requested, waiting for the server's starting position.
    Starting,
    /// The human may move when it is their turn.
    Ready,
    /// A move is applied locally and waits for the server.
    AwaitingRemote(PendingMove),
    GameOver(Outcome),
}

/// What the UI may do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Live,
    Review,
    AwaitingRemote,
    GameOver,
}

/// The locally applied move whose confirmation is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// Matches a delivery to the move it answers.
    pub id: u64,
    pub mv: Move,
    pub san: String,
    /// Live position before the move.
    pub before: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Draw(DrawReason),
    Resignation { winner: Color },
    /// The server declared the game finished for a reason the rules engine
    /// does not report.
    Ended,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::Checkmate { winner } | Self::Resignation { winner } => Some(*winner),
            Self::Draw(_) | Self::Ended => None,
        }
    }

    pub fn result_code(&self) -> &'static str {
        match self {
            Self::Ended => "*",
            other => result_code(other.winner()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Checkmate { winner } => {
                format!("Game Over: {} wins by Checkmate!", color_to_string(*winner))
            }
            Self::Draw(_) => "Game Over: Draw!".to_string(),
            Self::Resignation { winner } => {
                format!("Game Over: {} wins by resignation.", color_to_string(*winner))
            }
            Self::Ended => "Game Over: Game ended.".to_string(),
        }
    }
}

/// Enabled state of the start/prev and next/end navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub at_start: bool,
    pub at_end: bool,
}

/// Cursor movement requested from the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    First,
    Previous,
    Next,
    Last,
    To(usize),
}
