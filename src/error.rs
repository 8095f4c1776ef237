use chess::Square;
use thiserror::Error;

/// Why a move attempt was refused before it reached the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    NotStarted,
    Review,
    AwaitingRemote,
    GameOver,
    NotYourTurn,
    NotYourPiece,
}

impl Gate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "no game in progress",
            Self::Review => "reviewing history",
            Self::AwaitingRemote => "waiting for the opponent",
            Self::GameOver => "game is over",
            Self::NotYourTurn => "not your turn",
            Self::NotYourPiece => "not your piece",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The rules engine refused the move. The UI snaps the piece back.
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    #[error("Move not allowed: {}", .0.as_str())]
    MoveNotAllowed(Gate),
    /// Internal contract violation.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Index {index} out of range for timeline of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("Move rejected by server: {0}")]
    RemoteRejection(String),
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

impl GameError {
    /// Rejections the UI answers with a snap-back rather than an error message.
    pub fn is_snapback(&self) -> bool {
        matches!(self, Self::IllegalMove { .. } | Self::MoveNotAllowed(_))
    }
}

/// Failures of a single exchange with the remote authority.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Refused: {0}")]
    Refused(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<SyncError> for GameError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Refused(reason) => GameError::RemoteRejection(reason),
            other => GameError::NetworkFailure(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_exchange_is_remote_rejection() {
        let err: GameError = SyncError::Refused("Failed to start".to_string()).into();
        assert_eq!(err, GameError::RemoteRejection("Failed to start".to_string()));
        assert!(!err.is_snapback());

        let err: GameError = SyncError::Malformed("truncated".to_string()).into();
        assert!(matches!(err, GameError::NetworkFailure(_)));
    }

    #[test]
    fn test_gated_moves_snap_back() {
        assert!(GameError::MoveNotAllowed(Gate::Review).is_snapback());
        assert!(!GameError::InvalidTransition("append in review".to_string()).is_snapback());
    }
}
