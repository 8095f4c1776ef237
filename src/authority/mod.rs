//! The server side of the exchange: keeps its own record of the game, checks
//! submitted moves against it, and answers with the opponent's reply.

pub mod opponent;

use chess::Color;
use log::{info, warn};
use uuid::Uuid;

use crate::game::utils::{color_to_string, parse_color_code, result_code};
use crate::game::{AppliedMove, ChessRules, Move, RulesEngine, TerminalStatus};
use crate::models::{MoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ResignResponse, SquarePair};

pub use opponent::{Opponent, RandomOpponent, ScriptedOpponent};

pub struct ArbiterGame {
    id: Uuid,
    rules: ChessRules,
    human: Color,
    moves: Vec<Move>,
    result: Option<String>,
    opponent: Box<dyn Opponent + Send>,
}

impl ArbiterGame {
    pub fn new(opponent: Box<dyn Opponent + Send>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules: ChessRules::new(),
            human: Color::White,
            moves: Vec::new(),
            result: None,
            opponent,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rules(&self) -> &ChessRules {
        &self.rules
    }

    /// Moves played so far, both sides, in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn new_game(&mut self, request: &NewGameRequest) -> NewGameResponse {
        let human = match parse_color_code(&request.color) {
            Some(color) => color,
            None => {
                warn!("New game with unknown color {:?}", request.color);
                return NewGameResponse::default();
            }
        };

        self.id = Uuid::new_v4();
        self.rules.reset();
        self.human = human;
        self.moves.clear();
        self.result = None;
        info!("Game {} started, human plays {}", self.id, color_to_string(human));

        let mut response = NewGameResponse {
            ok: true,
            game_id: Some(self.id),
            chat: Some(format!(
                "Game started! You're playing {}.",
                color_to_string(human)
            )),
            ..NewGameResponse::default()
        };

        // The server side moves first when the human plays Black.
        if human == Color::Black {
            if let Some(reply) = self.opponent_move() {
                response.bot_chat = self.commentary();
                response.bot_san = Some(reply.san);
            }
        }
        response.fen = Some(self.rules.position().fen());
        response
    }

    pub fn make_move(&mut self, request: &MoveRequest) -> MoveResponse {
        if self.result.is_some() {
            return MoveResponse::rejected("Game is already over");
        }
        let mv: Move = match request.uci.parse() {
            Ok(mv) => mv,
            Err(e) => {
                warn!("Game {}: {}", self.id, e);
                return MoveResponse::rejected("Invalid move");
            }
        };
        if self.rules.turn() != self.human {
            return MoveResponse::rejected("Not your turn");
        }
        let applied = match self.rules.apply(&mv) {
            Some(applied) => applied,
            None => {
                warn!("Game {}: illegal move {}", self.id, mv);
                return MoveResponse::rejected("Illegal move");
            }
        };
        self.moves.push(applied.mv);
        info!("Game {}: human played {}", self.id, applied.san);

        let mut response = MoveResponse {
            ok: true,
            chat: Some(format!("You played {}", request.uci)),
            user_move: Some(SquarePair {
                from: mv.from.to_string(),
                to: mv.to.to_string(),
            }),
            ..MoveResponse::default()
        };

        if !self.finish_if_over() {
            if let Some(reply) = self.opponent_move() {
                response.bot_move = Some(SquarePair {
                    from: reply.mv.from.to_string(),
                    to: reply.mv.to.to_string(),
                });
                response.bot_san = Some(reply.san);
                response.bot_chat = self.commentary();
            }
            self.finish_if_over();
        }

        response.fen = Some(self.rules.position().fen());
        response.result = self.result.clone();
        response
    }

    pub fn resign(&mut self) -> ResignResponse {
        let result = result_code(Some(!self.human)).to_string();
        info!("Game {}: human resigned ({})", self.id, result);
        self.result = Some(result.clone());
        ResignResponse {
            ok: true,
            result: Some(result),
            chat: Some("You resigned.".to_string()),
        }
    }

    fn opponent_move(&mut self) -> Option<AppliedMove> {
        let mv = self.opponent.choose(&self.rules)?;
        match self.rules.apply(&mv) {
            Some(applied) => {
                info!("Game {}: opponent played {}", self.id, applied.san);
                self.moves.push(applied.mv);
                Some(applied)
            }
            None => {
                warn!("Game {}: opponent chose illegal move {}", self.id, mv);
                None
            }
        }
    }

    fn commentary(&self) -> Option<String> {
        if self.rules.position().board().checkers().popcnt() > 0 {
            Some("Check!".to_string())
        } else {
            None
        }
    }

    /// Records the result if the game just ended. Returns whether it is over.
    fn finish_if_over(&mut self) -> bool {
        let result = match self.rules.status() {
            TerminalStatus::Ongoing => return false,
            TerminalStatus::Checkmate { winner } => result_code(Some(winner)),
            TerminalStatus::Draw(_) => result_code(None),
        };
        info!("Game {} over: {}", self.id, result);
        self.result = Some(result.to_string());
        true
    }
}

impl Default for ArbiterGame {
    fn default() -> Self {
        Self::new(Box::new(RandomOpponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scripted(moves: &[&str]) -> ArbiterGame {
        ArbiterGame::new(Box::new(ScriptedOpponent::new(moves).unwrap()))
    }

    fn request(uci: &str) -> MoveRequest {
        MoveRequest {
            uci: uci.to_string(),
        }
    }

    #[test]
    fn test_new_game_as_white() {
        let mut game = scripted(&[]);
        let response = game.new_game(&NewGameRequest {
            color: "w".to_string(),
        });
        assert!(response.ok);
        assert_eq!(
            response.fen.as_deref(),
            Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        );
        assert!(response.bot_san.is_none());
        assert_eq!(response.game_id, Some(game.id()));
    }

    #[test]
    fn test_new_game_as_black_opens() {
        let mut game = scripted(&["e2e4"]);
        let response = game.new_game(&NewGameRequest {
            color: "b".to_string(),
        });
        assert!(response.ok);
        assert_eq!(response.bot_san.as_deref(), Some("e4"));
        assert_eq!(game.rules().turn(), Color::Black);
    }

    #[test]
    fn test_new_game_rejects_unknown_color() {
        let mut game = scripted(&[]);
        let response = game.new_game(&NewGameRequest {
            color: "green".to_string(),
        });
        assert!(!response.ok);
    }

    #[test]
    fn test_move_gets_reply() {
        let mut game = scripted(&["e7e5"]);
        game.new_game(&NewGameRequest {
            color: "w".to_string(),
        });
        let response = game.make_move(&request("e2e4"));
        assert!(response.ok);
        assert_eq!(response.bot_san.as_deref(), Some("e5"));
        assert_eq!(
            response.bot_move,
            Some(SquarePair {
                from: "e7".to_string(),
                to: "e5".to_string()
            })
        );
        assert_eq!(game.moves().len(), 2);
        assert!(response.result.is_none());
    }

    #[test]
    fn test_illegal_and_malformed_moves_rejected() {
        let mut game = scripted(&[]);
        game.new_game(&NewGameRequest {
            color: "w".to_string(),
        });
        assert_eq!(
            game.make_move(&request("e2e5")).error.as_deref(),
            Some("Illegal move")
        );
        assert_eq!(
            game.make_move(&request("zz")).error.as_deref(),
            Some("Invalid move")
        );
        assert!(game.moves().is_empty());
    }

    #[test]
    fn test_non_ascii_move_is_invalid() {
        let mut game = scripted(&[]);
        game.new_game(&NewGameRequest {
            color: "w".to_string(),
        });
        assert_eq!(
            game.make_move(&request("eé4x")),
            MoveResponse::rejected("Invalid move")
        );
        assert!(game.moves().is_empty());
        assert!(game.make_move(&request("e2e4")).ok);
    }

    #[test]
    fn test_mating_reply_reports_result() {
        let mut game = scripted(&["e7e5", "d8h4"]);
        game.new_game(&NewGameRequest {
            color: "w".to_string(),
        });
        game.make_move(&request("f2f3"));
        let response = game.make_move(&request("g2g4"));
        assert_eq!(response.bot_san.as_deref(), Some("Qh4#"));
        assert_eq!(response.result.as_deref(), Some("0-1"));
        assert_eq!(
            game.make_move(&request("e2e4")).error.as_deref(),
            Some("Game is already over")
        );
    }

    #[test]
    fn test_resign() {
        let mut game = scripted(&[]);
        game.new_game(&NewGameRequest {
            color: "b".to_string(),
        });
        let response = game.resign();
        assert!(response.ok);
        assert_eq!(response.result.as_deref(), Some("1-0"));
        assert_eq!(game.result(), Some("1-0"));
    }
}
