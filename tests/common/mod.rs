#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use actix::Addr;
use chess::{Color, Square};
use futures::future::{self, FutureExt, LocalBoxFuture};

use chess_sync::authority::{ArbiterGame, ScriptedOpponent};
use chess_sync::client::{BoardWidget, GameActor, GetSnapshot, Presenter, SessionSnapshot};
use chess_sync::game::{MoveHint, Position, Promotion};
use chess_sync::models::{MoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ResignResponse};
use chess_sync::session::NavState;
use chess_sync::sync::{Arbiter, DelayPolicy, LocalArbiter, SyncClient};
use chess_sync::SyncError;

/// Everything the actor pushed to the page.
#[derive(Debug, Default)]
pub struct Page {
    pub positions: Vec<(Position, bool)>,
    pub orientation: Option<Color>,
    pub highlights: Vec<(Square, Square)>,
    pub hints: Vec<MoveHint>,
    pub resizes: usize,
    pub status: Vec<(String, bool)>,
    pub chat: Vec<String>,
    pub moves: Vec<String>,
    pub nav: Option<NavState>,
    pub alerts: Vec<String>,
}

impl Page {
    pub fn last_status(&self) -> &str {
        self.status.last().map(|(text, _)| text.as_str()).unwrap_or("")
    }

    pub fn last_position(&self) -> Option<Position> {
        self.positions.last().map(|(position, _)| *position)
    }
}

pub struct FakeBoard(pub Rc<RefCell<Page>>);

impl BoardWidget for FakeBoard {
    fn set_position(&mut self, position: &Position, animate: bool) {
        self.0.borrow_mut().positions.push((*position, animate));
    }

    fn set_orientation(&mut self, side: Color) {
        self.0.borrow_mut().orientation = Some(side);
    }

    fn resize(&mut self) {
        self.0.borrow_mut().resizes += 1;
    }

    fn highlight_move(&mut self, from: Square, to: Square) {
        self.0.borrow_mut().highlights.push((from, to));
    }

    fn clear_highlights(&mut self) {
        self.0.borrow_mut().highlights.clear();
    }

    fn show_hints(&mut self, hints: &[MoveHint]) {
        self.0.borrow_mut().hints = hints.to_vec();
    }

    fn clear_hints(&mut self) {
        self.0.borrow_mut().hints.clear();
    }
}

pub struct FakePresenter(pub Rc<RefCell<Page>>);

impl Presenter for FakePresenter {
    fn set_status(&mut self, text: &str, ok: bool) {
        self.0.borrow_mut().status.push((text.to_string(), ok));
    }

    fn append_chat(&mut self, text: &str) {
        self.0.borrow_mut().chat.push(text.to_string());
    }

    fn clear_chat(&mut self) {
        self.0.borrow_mut().chat.clear();
    }

    fn show_moves(&mut self, moves: &[String]) {
        self.0.borrow_mut().moves = moves.to_vec();
    }

    fn set_navigation(&mut self, nav: NavState) {
        self.0.borrow_mut().nav = Some(nav);
    }

    fn alert(&mut self, text: &str) {
        self.0.borrow_mut().alerts.push(text.to_string());
    }
}

/// Which exchanges fail at the transport level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outages {
    pub new_game: bool,
    pub moves: bool,
    /// The server answers the new-game request with `ok: false`.
    pub refuse_new_game: bool,
}

/// A local authority that can drop exchanges on the floor.
pub struct FlakyArbiter {
    pub inner: LocalArbiter,
    pub outages: Rc<RefCell<Outages>>,
}

impl Arbiter for FlakyArbiter {
    fn new_game(
        &self,
        request: NewGameRequest,
    ) -> LocalBoxFuture<'static, Result<NewGameResponse, SyncError>> {
        if self.outages.borrow().new_game {
            return future::ready(Err(SyncError::Malformed("connection reset".to_string())))
                .boxed_local();
        }
        if self.outages.borrow().refuse_new_game {
            return future::ready(Ok(NewGameResponse::default())).boxed_local();
        }
        self.inner.new_game(request)
    }

    fn submit_move(
        &self,
        request: MoveRequest,
    ) -> LocalBoxFuture<'static, Result<MoveResponse, SyncError>> {
        if self.outages.borrow().moves {
            return future::ready(Err(SyncError::Malformed("connection reset".to_string())))
                .boxed_local();
        }
        self.inner.submit_move(request)
    }

    fn resign(&self) -> LocalBoxFuture<'static, Result<ResignResponse, SyncError>> {
        self.inner.resign()
    }
}

pub struct Harness {
    pub addr: Addr<GameActor>,
    pub page: Rc<RefCell<Page>>,
    pub server: LocalArbiter,
    pub outages: Rc<RefCell<Outages>>,
}

/// Starts a game actor against an in-process authority whose replies follow `script`.
pub fn harness(script: &[&str]) -> Harness {
    let opponent = ScriptedOpponent::new(script).unwrap();
    let server = LocalArbiter::new(ArbiterGame::new(Box::new(opponent)));
    let outages = Rc::new(RefCell::new(Outages::default()));
    let arbiter = FlakyArbiter {
        inner: server.clone(),
        outages: outages.clone(),
    };
    let page = Rc::new(RefCell::new(Page::default()));
    let actor = GameActor::new(
        SyncClient::new(Rc::new(arbiter), DelayPolicy::none()),
        Promotion::Queen,
        Box::new(FakeBoard(page.clone())),
        Box::new(FakePresenter(page.clone())),
    );
    Harness {
        addr: actix::Actor::start(actor),
        page,
        server,
        outages,
    }
}

/// Waits until no move is in flight and returns the session.
pub async fn settle(addr: &Addr<GameActor>) -> SessionSnapshot {
    for _ in 0..200 {
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        if !snapshot.pending {
            return snapshot;
        }
        actix_rt::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("move still pending after waiting");
}

pub fn sq(name: &str) -> Square {
    name.parse().unwrap()
}
