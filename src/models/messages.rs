use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to start a game, sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewGameRequest {
    /// Side the human plays: "w" or "b"
    pub color: String,
}

/// Server answer to a new game request
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NewGameResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<Uuid>,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub chat: Option<String>,
    #[serde(rename = "botSAN", default)]
    pub bot_san: Option<String>,
    #[serde(rename = "botChat", default)]
    pub bot_chat: Option<String>,
}

/// A move submitted by the client, in square-pair notation
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MoveRequest {
    pub uci: String,
}

/// Source and destination squares of a move
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SquarePair {
    pub from: String,
    pub to: String,
}

/// Server answer to a submitted move
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MoveResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<String>,
    #[serde(default)]
    pub bot_san: Option<String>,
    #[serde(default)]
    pub bot_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_move: Option<SquarePair>,
    #[serde(default)]
    pub bot_move: Option<SquarePair>,
    /// Result code, present once the game is over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl MoveResponse {
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Server answer to a resignation
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ResignResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub chat: Option<String>,
}
