use futures::future::{self, FutureExt, LocalBoxFuture};
use std::sync::{Arc, Mutex};

use crate::authority::ArbiterGame;
use crate::error::SyncError;
use crate::models::{MoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ResignResponse};
use crate::sync::arbiter::Arbiter;

/// An authority running in the same process, for offline play and tests.
#[derive(Clone)]
pub struct LocalArbiter {
    game: Arc<Mutex<ArbiterGame>>,
}

impl LocalArbiter {
    pub fn new(game: ArbiterGame) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// Runs `f` against the server-side record.
    pub fn with_game<T>(&self, f: impl FnOnce(&mut ArbiterGame) -> T) -> Result<T, SyncError> {
        let mut game = self
            .game
            .lock()
            .map_err(|_| SyncError::Malformed("authority state poisoned".to_string()))?;
        Ok(f(&mut game))
    }
}

impl Arbiter for LocalArbiter {
    fn new_game(
        &self,
        request: NewGameRequest,
    ) -> LocalBoxFuture<'static, Result<NewGameResponse, SyncError>> {
        future::ready(self.with_game(|game| game.new_game(&request))).boxed_local()
    }

    fn submit_move(
        &self,
        request: MoveRequest,
    ) -> LocalBoxFuture<'static, Result<MoveResponse, SyncError>> {
        future::ready(self.with_game(|game| game.make_move(&request))).boxed_local()
    }

    fn resign(&self) -> LocalBoxFuture<'static, Result<ResignResponse, SyncError>> {
        future::ready(self.with_game(|game| game.resign())).boxed_local()
    }
}
