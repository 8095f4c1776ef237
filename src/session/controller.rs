use chess::{Color, Square};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::{GameError, Gate};
use crate::game::utils::color_to_string;
use crate::game::{ChessRules, Move, MoveHint, Position, Promotion, RulesEngine, TerminalStatus};
use crate::session::state::{Mode, Nav, Outcome, PendingMove, Phase};
use crate::session::timeline::HistoryTimeline;
use crate::sync::{NewGameStart, RemoteRejection, RemoteReply, RemoteResult};

/// A user move accepted locally and waiting for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedMove {
    pub pending_id: u64,
    pub mv: Move,
    pub san: String,
    pub position: Position,
}

/// What applying a remote result did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteApplied {
    Confirmed {
        reply: Option<RemoteReply>,
        outcome: Option<Outcome>,
    },
    RolledBack {
        rejection: RemoteRejection,
        restored: Position,
    },
    /// The result answered a move that is no longer pending.
    Discarded,
}

/// Owns the live game and its timeline, and decides every state change.
pub struct GameStateController<R: RulesEngine = ChessRules> {
    rules: R,
    timeline: HistoryTimeline,
    human: Color,
    phase: Phase,
    promotion: Promotion,
    next_pending_id: u64,
    session_id: Uuid,
}

impl GameStateController<ChessRules> {
    pub fn new(promotion: Promotion) -> Self {
        Self::with_rules(ChessRules::new(), promotion)
    }
}

impl<R: RulesEngine> GameStateController<R> {
    pub fn with_rules(mut rules: R, promotion: Promotion) -> Self {
        rules.reset();
        let timeline = HistoryTimeline::new(rules.position());
        Self {
            rules,
            timeline,
            human: Color::White,
            phase: Phase::Idle,
            promotion,
            next_pending_id: 1,
            session_id: Uuid::new_v4(),
        }
    }

    /// Resets the session for a new game as `side`. The game is playable once
    /// the server's starting state arrives through `confirm_new_game`.
    pub fn start_game(&mut self, side: Color) {
        self.rules.reset();
        self.timeline.reset(self.rules.position());
        self.human = side;
        self.phase = Phase::Starting;
        self.session_id = Uuid::new_v4();
        info!(
            "Session {}: starting new game as {}",
            self.session_id,
            color_to_string(side)
        );
    }

    pub fn confirm_new_game(&mut self, start: NewGameStart) -> Result<(), GameError> {
        if self.phase != Phase::Starting {
            return Err(GameError::InvalidTransition(format!(
                "new game confirmed while {:?}",
                self.phase
            )));
        }

        match &start.opening {
            Some(opening) => {
                self.timeline.reset(self.rules.position());
                self.timeline
                    .append(start.position, Some(opening.san.clone()))?;
                info!(
                    "Session {}: server opened with {}",
                    self.session_id, opening.san
                );
            }
            None => self.timeline.reset(start.position),
        }
        self.rules.load(&start.position);
        self.phase = Phase::Ready;
        if let Some(game_id) = start.game_id {
            debug!("Session {}: server game {}", self.session_id, game_id);
        }
        self.check_terminal();
        Ok(())
    }

    pub fn fail_new_game(&mut self) {
        if self.phase == Phase::Starting {
            warn!("Session {}: server did not start the game", self.session_id);
            self.phase = Phase::Idle;
        }
    }

    /// Refusals that apply to every interaction with the live board.
    fn gate(&self) -> Result<(), GameError> {
        match &self.phase {
            Phase::Idle | Phase::Starting => Err(GameError::MoveNotAllowed(Gate::NotStarted)),
            Phase::GameOver(_) => Err(GameError::MoveNotAllowed(Gate::GameOver)),
            _ if !self.timeline.is_live() => Err(GameError::MoveNotAllowed(Gate::Review)),
            Phase::AwaitingRemote(_) => Err(GameError::MoveNotAllowed(Gate::AwaitingRemote)),
            Phase::Ready => Ok(()),
        }
    }

    /// Checks that the human may pick up the piece on `square`.
    fn gate_piece(&self, square: Square) -> Result<(), GameError> {
        self.gate()?;
        if self.rules.turn() != self.human {
            return Err(GameError::MoveNotAllowed(Gate::NotYourTurn));
        }
        match self.rules.piece_at(square) {
            Some((_, color)) if color == self.human => Ok(()),
            _ => Err(GameError::MoveNotAllowed(Gate::NotYourPiece)),
        }
    }

    /// Legal destinations to highlight when the human starts dragging from `square`.
    pub fn drag_start(&self, square: Square) -> Result<Vec<MoveHint>, GameError> {
        self.gate_piece(square)?;
        Ok(self.rules.moves_from(square))
    }

    /// Applies the human's move locally and marks it pending.
    pub fn attempt_user_move(&mut self, mv: Move) -> Result<SubmittedMove, GameError> {
        self.gate_piece(mv.from)?;

        let mv = match mv.promotion {
            Some(_) => mv,
            None => mv.with_promotion(self.promotion.piece()),
        };
        let before = self.rules.position();
        let applied = match self.rules.apply(&mv) {
            Some(applied) => applied,
            None => {
                debug!("Session {}: illegal move {}", self.session_id, mv);
                return Err(GameError::IllegalMove {
                    from: mv.from,
                    to: mv.to,
                });
            }
        };

        if let Err(err) = self
            .timeline
            .append(applied.position, Some(applied.san.clone()))
        {
            self.rules.load(&before);
            return Err(err);
        }

        let pending_id = self.next_pending_id;
        self.next_pending_id += 1;
        self.phase = Phase::AwaitingRemote(PendingMove {
            id: pending_id,
            mv: applied.mv,
            san: applied.san.clone(),
            before,
        });
        info!(
            "Session {}: played {} ({}), awaiting server",
            self.session_id, applied.san, applied.mv
        );

        Ok(SubmittedMove {
            pending_id,
            mv: applied.mv,
            san: applied.san,
            position: applied.position,
        })
    }

    /// Merges the server's answer to pending move `pending_id`.
    pub fn apply_remote_result(
        &mut self,
        pending_id: u64,
        result: RemoteResult,
    ) -> Result<RemoteApplied, GameError> {
        let pending = match &self.phase {
            Phase::AwaitingRemote(pending) if pending.id == pending_id => pending.clone(),
            _ => {
                warn!(
                    "Session {}: discarding result for move {} in phase {:?}",
                    self.session_id, pending_id, self.phase
                );
                return Ok(RemoteApplied::Discarded);
            }
        };

        // The result always lands on the live end.
        self.timeline.last();
        self.phase = Phase::Ready;

        match result {
            RemoteResult::Confirmed(update) => {
                match &update.reply {
                    Some(reply) => {
                        self.timeline
                            .append(update.position, Some(reply.san.clone()))?;
                        info!("Session {}: server replied {}", self.session_id, reply.san);
                    }
                    None if !update.position.same_board(self.timeline.latest()) => {
                        warn!(
                            "Session {}: server position differs after {}, adopting it",
                            self.session_id, pending.san
                        );
                        self.timeline.truncate_last()?;
                        self.timeline
                            .append(update.position, Some(pending.san.clone()))?;
                    }
                    None => {}
                }
                self.rules.load(&update.position);

                let mut outcome = self.check_terminal();
                if outcome.is_none() && update.result.is_some() {
                    info!(
                        "Session {}: server ended the game ({:?})",
                        self.session_id, update.result
                    );
                    self.phase = Phase::GameOver(Outcome::Ended);
                    outcome = Some(Outcome::Ended);
                }
                Ok(RemoteApplied::Confirmed {
                    reply: update.reply,
                    outcome,
                })
            }
            RemoteResult::Rejected(rejection) => {
                warn!(
                    "Session {}: rolling back {}: {}",
                    self.session_id, pending.san, rejection.reason
                );
                let restored = *self.timeline.truncate_last()?;
                self.rules.load(&restored);
                Ok(RemoteApplied::RolledBack {
                    rejection,
                    restored,
                })
            }
        }
    }

    /// Moves the session to game over when the rules engine says the game ended.
    pub fn check_terminal(&mut self) -> Option<Outcome> {
        if let Phase::GameOver(outcome) = &self.phase {
            return Some(outcome.clone());
        }
        let outcome = match self.rules.status() {
            TerminalStatus::Ongoing => return None,
            TerminalStatus::Checkmate { winner } => Outcome::Checkmate { winner },
            TerminalStatus::Draw(reason) => Outcome::Draw(reason),
        };
        info!("Session {}: {}", self.session_id, outcome.describe());
        self.phase = Phase::GameOver(outcome.clone());
        Some(outcome)
    }

    pub fn resign(&mut self) -> Result<Outcome, GameError> {
        match &self.phase {
            Phase::Idle | Phase::Starting => Err(GameError::MoveNotAllowed(Gate::NotStarted)),
            Phase::GameOver(_) => Err(GameError::MoveNotAllowed(Gate::GameOver)),
            Phase::Ready | Phase::AwaitingRemote(_) => {
                let outcome = Outcome::Resignation {
                    winner: !self.human,
                };
                info!("Session {}: {} resigned", self.session_id, color_to_string(self.human));
                self.phase = Phase::GameOver(outcome.clone());
                Ok(outcome)
            }
        }
    }

    pub fn navigate(&mut self, nav: Nav) -> Result<&Position, GameError> {
        let position = match nav {
            Nav::First => self.timeline.first(),
            Nav::Previous => self.timeline.previous(),
            Nav::Next => self.timeline.next(),
            Nav::Last => self.timeline.last(),
            Nav::To(index) => self.timeline.navigate_to(index)?,
        };
        Ok(position)
    }

    pub fn navigate_to(&mut self, index: usize) -> Result<&Position, GameError> {
        self.navigate(Nav::To(index))
    }

    pub fn mode(&self) -> Mode {
        match &self.phase {
            Phase::Idle | Phase::Starting => Mode::Idle,
            Phase::GameOver(_) => Mode::GameOver,
            _ if !self.timeline.is_live() => Mode::Review,
            Phase::AwaitingRemote(_) => Mode::AwaitingRemote,
            Phase::Ready => Mode::Live,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        match &self.phase {
            Phase::AwaitingRemote(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Position the board should show: the one under the timeline cursor.
    pub fn displayed_position(&self) -> &Position {
        self.timeline.current()
    }

    pub fn live_position(&self) -> Position {
        self.rules.position()
    }

    pub fn timeline(&self) -> &HistoryTimeline {
        &self.timeline
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn human_side(&self) -> Color {
        self.human
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}
