use chess::Square;
use uuid::Uuid;

use crate::game::Position;

/// The opponent's move as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    pub san: String,
    /// Source and destination, when the server sends them.
    pub squares: Option<(Square, Square)>,
}

/// Authoritative state after a confirmed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpdate {
    pub position: Position,
    pub reply: Option<RemoteReply>,
    pub commentary: Option<String>,
    /// Result code when the server declares the game finished.
    pub result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The server refused the move.
    Refused,
    /// The exchange did not complete.
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRejection {
    pub kind: RejectionKind,
    pub reason: String,
}

/// Resolution of one submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResult {
    Confirmed(RemoteUpdate),
    Rejected(RemoteRejection),
}

impl RemoteResult {
    pub fn refused(reason: impl Into<String>) -> Self {
        Self::Rejected(RemoteRejection {
            kind: RejectionKind::Refused,
            reason: reason.into(),
        })
    }

    pub fn network(reason: impl Into<String>) -> Self {
        Self::Rejected(RemoteRejection {
            kind: RejectionKind::Network,
            reason: reason.into(),
        })
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Starting state of a game accepted by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameStart {
    pub game_id: Option<Uuid>,
    /// Live position, after the opening reply if there is one.
    pub position: Position,
    /// The server's first move when it plays White.
    pub opening: Option<RemoteReply>,
    pub greeting: Option<String>,
    pub opening_commentary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResignationNotice {
    pub result: String,
    pub commentary: Option<String>,
}
