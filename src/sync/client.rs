use chess::{Color, Square};
use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, info, warn};
use std::rc::Rc;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{GameError, SyncError};
use crate::game::utils::color_code;
use crate::game::{Move, Position};
use crate::models::{MoveRequest, MoveResponse, NewGameRequest, SquarePair};
use crate::sync::arbiter::Arbiter;
use crate::sync::delay::DelayPolicy;
use crate::sync::http::HttpArbiter;
use crate::sync::result::{NewGameStart, RemoteReply, RemoteResult, RemoteUpdate, ResignationNotice};

/// Runs the exchanges with the remote authority.
///
/// A confirmed move resolves only after a randomized pause, so the opponent
/// appears to think. Rejections resolve at once. Nothing here touches the
/// session; callers hand the result to the controller.
#[derive(Clone)]
pub struct SyncClient {
    arbiter: Rc<dyn Arbiter>,
    delay: DelayPolicy,
}

impl SyncClient {
    pub fn new(arbiter: Rc<dyn Arbiter>, delay: DelayPolicy) -> Self {
        Self { arbiter, delay }
    }

    /// Client for the HTTP authority at `config.server_url`.
    pub fn from_config(config: &Config) -> Self {
        info!("Using authority at {}", config.server_url);
        Self::new(
            Rc::new(HttpArbiter::new(config.server_url.clone())),
            config.reply_delay.into(),
        )
    }

    pub fn delay(&self) -> DelayPolicy {
        self.delay
    }

    pub fn submit_move(&self, mv: Move) -> LocalBoxFuture<'static, RemoteResult> {
        let exchange = self.arbiter.submit_move(MoveRequest { uci: mv.uci() });
        let delay = self.delay.sample();
        async move {
            let response = match exchange.await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Move {} did not reach the server: {}", mv, e);
                    return RemoteResult::network(e.to_string());
                }
            };
            let result = interpret_move_response(response);
            if !result.is_rejection() {
                debug!("Holding reply to {} for {:?}", mv, delay);
                actix_rt::time::sleep(delay).await;
            }
            result
        }
        .boxed_local()
    }

    pub fn request_new_game(&self, side: Color) -> LocalBoxFuture<'static, Result<NewGameStart, GameError>> {
        let exchange = self.arbiter.new_game(NewGameRequest {
            color: color_code(side).to_string(),
        });
        async move {
            let response = exchange.await?;
            if !response.ok {
                warn!("Server refused to start a game");
                return Err(SyncError::Refused("Failed to start".to_string()).into());
            }
            let fen = response
                .fen
                .ok_or_else(|| GameError::NetworkFailure("new game without a position".to_string()))?;
            let position = Position::from_str(&fen)?;
            info!("Server started game {:?}", response.game_id);
            Ok(NewGameStart {
                game_id: response.game_id,
                position,
                opening: response.bot_san.map(|san| RemoteReply { san, squares: None }),
                greeting: response.chat,
                opening_commentary: response.bot_chat,
            })
        }
        .boxed_local()
    }

    pub fn request_resignation(&self) -> LocalBoxFuture<'static, Result<ResignationNotice, GameError>> {
        let exchange = self.arbiter.resign();
        async move {
            let response = exchange.await?;
            if !response.ok {
                return Err(SyncError::Refused("Resignation refused".to_string()).into());
            }
            Ok(ResignationNotice {
                result: response.result.unwrap_or_else(|| "*".to_string()),
                commentary: response.chat,
            })
        }
        .boxed_local()
    }
}

fn parse_squares(pair: &SquarePair) -> Option<(Square, Square)> {
    let from = Square::from_str(&pair.from.to_lowercase()).ok()?;
    let to = Square::from_str(&pair.to.to_lowercase()).ok()?;
    Some((from, to))
}

/// Turns the server's answer to a move into a `RemoteResult`.
pub fn interpret_move_response(response: MoveResponse) -> RemoteResult {
    if let Some(error) = response.error {
        return RemoteResult::refused(error);
    }
    if !response.ok {
        return RemoteResult::refused("Move rejected");
    }
    let fen = match response.fen {
        Some(fen) => fen,
        None => return RemoteResult::network("response carried no position"),
    };
    let position = match Position::from_str(&fen) {
        Ok(position) => position,
        Err(e) => return RemoteResult::network(e.to_string()),
    };
    let squares = response.bot_move.as_ref().and_then(parse_squares);
    RemoteResult::Confirmed(RemoteUpdate {
        position,
        reply: response.bot_san.map(|san| RemoteReply { san, squares }),
        commentary: response.bot_chat,
        result: response.result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::RejectionKind;

    #[test]
    fn test_from_config_uses_reply_delay() {
        let config = Config::from_json(r#"{"reply_delay": {"min_ms": 10, "max_ms": 20}}"#).unwrap();
        assert_eq!(SyncClient::from_config(&config).delay(), DelayPolicy::new(10, 20));
    }

    #[test]
    fn test_error_is_refusal() {
        let result = interpret_move_response(MoveResponse::rejected("Illegal move"));
        match result {
            RemoteResult::Rejected(rejection) => {
                assert_eq!(rejection.kind, RejectionKind::Refused);
                assert_eq!(rejection.reason, "Illegal move");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_bad_position_is_network_failure() {
        let response = MoveResponse {
            ok: true,
            ..MoveResponse::default()
        };
        assert!(matches!(
            interpret_move_response(response),
            RemoteResult::Rejected(rejection) if rejection.kind == RejectionKind::Network
        ));

        let response = MoveResponse {
            ok: true,
            fen: Some("garbage".to_string()),
            ..MoveResponse::default()
        };
        assert!(interpret_move_response(response).is_rejection());
    }

    #[test]
    fn test_reply_is_parsed() {
        let response = MoveResponse {
            ok: true,
            fen: Some("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2".to_string()),
            bot_san: Some("e5".to_string()),
            bot_move: Some(SquarePair {
                from: "e7".to_string(),
                to: "e5".to_string(),
            }),
            bot_chat: Some("Check this out".to_string()),
            ..MoveResponse::default()
        };
        match interpret_move_response(response) {
            RemoteResult::Confirmed(update) => {
                let reply = update.reply.unwrap();
                assert_eq!(reply.san, "e5");
                assert_eq!(
                    reply.squares,
                    Some((Square::from_str("e7").unwrap(), Square::from_str("e5").unwrap()))
                );
                assert_eq!(update.commentary.as_deref(), Some("Check this out"));
                assert_eq!(update.position.fullmove_number(), 2);
            }
            other => panic!("expected confirmation, got {:?}", other),
        }
    }
}
