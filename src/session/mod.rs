pub mod controller;
pub mod state;
pub mod timeline;

pub use controller::{GameStateController, RemoteApplied, SubmittedMove};
pub use state::{Mode, Nav, NavState, Outcome, PendingMove, Phase};
pub use timeline::HistoryTimeline;
