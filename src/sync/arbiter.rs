use futures::future::LocalBoxFuture;

use crate::error::SyncError;
use crate::models::{MoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ResignResponse};

/// The remote authority: three request/response exchanges.
///
/// Futures are local because the client runs on a single-threaded event loop.
pub trait Arbiter {
    fn new_game(&self, request: NewGameRequest)
        -> LocalBoxFuture<'static, Result<NewGameResponse, SyncError>>;

    fn submit_move(&self, request: MoveRequest)
        -> LocalBoxFuture<'static, Result<MoveResponse, SyncError>>;

    fn resign(&self) -> LocalBoxFuture<'static, Result<ResignResponse, SyncError>>;
}
