use actix::prelude::*;
use log::{debug, info, warn};

use crate::client::messages::*;
use crate::client::view::{BoardWidget, Presenter};
use crate::config::Config;
use crate::error::GameError;
use crate::game::{Move, Promotion};
use crate::session::{GameStateController, Outcome, RemoteApplied};
use crate::sync::{NewGameStart, RejectionKind, RemoteResult, ResignationNotice, SyncClient};

/// Event loop of the game page.
///
/// Every user event and every server answer is handled here, one at a time,
/// so the controller never sees two state changes interleave. Server
/// exchanges run as futures spawned on this actor's context and come back
/// through `on_*` callbacks.
pub struct GameActor {
    controller: GameStateController,
    sync: SyncClient,
    board: Box<dyn BoardWidget>,
    presenter: Box<dyn Presenter>,
}

impl GameActor {
    pub fn new(
        sync: SyncClient,
        promotion: Promotion,
        board: Box<dyn BoardWidget>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            controller: GameStateController::new(promotion),
            sync,
            board,
            presenter,
        }
    }

    pub fn from_config(
        config: &Config,
        board: Box<dyn BoardWidget>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self::new(SyncClient::from_config(config), config.promotion, board, presenter)
    }

    fn refresh_moves(&mut self) {
        let timeline = self.controller.timeline();
        self.presenter.show_moves(&timeline.moves());
        self.presenter.set_navigation(timeline.nav_state());
    }

    fn report_outcome(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(outcome) => self.presenter.set_status(&outcome.describe(), false),
            None => self.presenter.set_status("Your move.", true),
        }
    }

    fn on_new_game(&mut self, result: Result<NewGameStart, GameError>) {
        let start = match result {
            Ok(start) => start,
            Err(e) => {
                warn!("New game failed: {}", e);
                self.controller.fail_new_game();
                let status = match e {
                    GameError::RemoteRejection(_) => "Failed to start",
                    _ => "Network error starting game.",
                };
                self.presenter.set_status(status, false);
                return;
            }
        };

        let greeting = start.greeting.clone();
        let opening_commentary = start.opening_commentary.clone();
        let opened = start.opening.is_some();
        if let Err(e) = self.controller.confirm_new_game(start) {
            warn!("Ignoring new game confirmation: {}", e);
            return;
        }

        self.board
            .set_position(self.controller.displayed_position(), opened);
        if let Some(greeting) = greeting {
            self.presenter.append_chat(&greeting);
        }
        if let Some(commentary) = opening_commentary.filter(|_| opened) {
            self.presenter.append_chat(&commentary);
        }
        self.refresh_moves();
        let outcome = self.controller.outcome().cloned();
        self.report_outcome(outcome);
    }

    fn on_remote_result(&mut self, pending_id: u64, result: RemoteResult) {
        let commentary = match &result {
            RemoteResult::Confirmed(update) => update.commentary.clone(),
            RemoteResult::Rejected(_) => None,
        };

        match self.controller.apply_remote_result(pending_id, result) {
            Ok(RemoteApplied::Confirmed { reply, outcome }) => {
                self.board
                    .set_position(self.controller.displayed_position(), true);
                if let Some(reply) = reply {
                    if let Some((from, to)) = reply.squares {
                        self.board.highlight_move(from, to);
                    }
                    self.presenter.append_chat(&format!(
                        "Played {}. {}",
                        reply.san,
                        commentary.unwrap_or_default()
                    ));
                }
                self.refresh_moves();
                self.report_outcome(outcome);
            }
            Ok(RemoteApplied::RolledBack {
                rejection,
                restored,
            }) => {
                self.board.clear_highlights();
                self.board.set_position(&restored, false);
                self.refresh_moves();
                match rejection.kind {
                    RejectionKind::Refused => {
                        self.presenter.alert(&format!("Error: {}", rejection.reason))
                    }
                    RejectionKind::Network => self
                        .presenter
                        .set_status(&format!("Network error: {}", rejection.reason), false),
                }
            }
            Ok(RemoteApplied::Discarded) => {
                debug!("Result for move {} arrived after the session moved on", pending_id);
            }
            Err(e) => warn!("Could not apply server result: {}", e),
        }
    }

    fn on_resigned(&mut self, result: Result<ResignationNotice, GameError>) {
        match result {
            Ok(notice) => {
                let chat = notice
                    .commentary
                    .unwrap_or_else(|| "You resigned.".to_string());
                self.presenter.append_chat(&chat);
                self.presenter
                    .set_status(&format!("Game Over: {}", notice.result), true);
            }
            Err(e) => warn!("Server did not acknowledge resignation: {}", e),
        }
    }
}

impl Actor for GameActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Game session {} started", self.controller.session_id());
    }
}

impl Handler<StartGame> for GameActor {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, msg: StartGame, _ctx: &mut Self::Context) -> Self::Result {
        let side = msg.0;
        self.controller.start_game(side);
        let session = self.controller.session_id();

        self.board.set_orientation(side);
        self.board.clear_highlights();
        self.board.clear_hints();
        self.board
            .set_position(self.controller.displayed_position(), false);
        self.presenter.clear_chat();
        self.refresh_moves();
        self.presenter.set_status("Starting new game...", true);

        Box::pin(
            self.sync
                .request_new_game(side)
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    if act.controller.session_id() != session {
                        debug!("Dropping start of superseded session {}", session);
                        return;
                    }
                    act.on_new_game(result);
                }),
        )
    }
}

impl Handler<DragStart> for GameActor {
    type Result = MessageResult<DragStart>;

    fn handle(&mut self, msg: DragStart, _ctx: &mut Self::Context) -> Self::Result {
        match self.controller.drag_start(msg.square) {
            Ok(hints) => {
                self.board.clear_hints();
                if !hints.is_empty() {
                    self.board.show_hints(&hints);
                }
                MessageResult(true)
            }
            Err(e) => {
                debug!("Drag from {} refused: {}", msg.square, e);
                MessageResult(false)
            }
        }
    }
}

impl Handler<DropPiece> for GameActor {
    type Result = MessageResult<DropPiece>;

    fn handle(&mut self, msg: DropPiece, ctx: &mut Self::Context) -> Self::Result {
        self.board.clear_hints();

        let submitted = match self.controller.attempt_user_move(Move::new(msg.from, msg.to)) {
            Ok(submitted) => submitted,
            Err(e) if e.is_snapback() => {
                debug!("Drop {}{} snapped back: {}", msg.from, msg.to, e);
                return MessageResult(DropOutcome::Snapback);
            }
            Err(e) => {
                warn!("Drop {}{} failed: {}", msg.from, msg.to, e);
                self.presenter.set_status(&e.to_string(), false);
                return MessageResult(DropOutcome::Snapback);
            }
        };

        self.board.highlight_move(msg.from, msg.to);
        self.board.set_position(&submitted.position, false);
        self.refresh_moves();

        let pending_id = submitted.pending_id;
        ctx.spawn(
            self.sync
                .submit_move(submitted.mv)
                .into_actor(self)
                .map(move |result, act, _ctx| act.on_remote_result(pending_id, result)),
        );

        MessageResult(DropOutcome::Accepted { san: submitted.san })
    }
}

impl Handler<SnapEnd> for GameActor {
    type Result = ();

    fn handle(&mut self, _msg: SnapEnd, _ctx: &mut Self::Context) {
        let live = self.controller.live_position();
        self.board.set_position(&live, false);
    }
}

impl Handler<Navigate> for GameActor {
    type Result = ();

    fn handle(&mut self, msg: Navigate, _ctx: &mut Self::Context) {
        match self.controller.navigate(msg.0) {
            Ok(position) => {
                let position = *position;
                self.board.set_position(&position, true);
                self.presenter
                    .set_navigation(self.controller.timeline().nav_state());
            }
            Err(e) => warn!("Navigation {:?} ignored: {}", msg.0, e),
        }
    }
}

impl Handler<Resign> for GameActor {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _msg: Resign, _ctx: &mut Self::Context) -> Self::Result {
        match self.controller.resign() {
            Ok(outcome) => {
                self.presenter.set_status(&outcome.describe(), false);
                Box::pin(
                    self.sync
                        .request_resignation()
                        .into_actor(self)
                        .map(|result, act, _ctx| act.on_resigned(result)),
                )
            }
            Err(e) => {
                debug!("Resignation ignored: {}", e);
                Box::pin(fut::ready(()))
            }
        }
    }
}

impl Handler<Resize> for GameActor {
    type Result = ();

    fn handle(&mut self, _msg: Resize, _ctx: &mut Self::Context) {
        self.board.resize();
    }
}

impl Handler<GetSnapshot> for GameActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        let timeline = self.controller.timeline();
        MessageResult(SessionSnapshot {
            mode: self.controller.mode(),
            human: self.controller.human_side(),
            timeline_len: timeline.len(),
            cursor: timeline.cursor(),
            pending: self.controller.pending().is_some(),
            displayed: *self.controller.displayed_position(),
            live: self.controller.live_position(),
            moves: timeline.moves(),
            outcome: self.controller.outcome().cloned(),
        })
    }
}
