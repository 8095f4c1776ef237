//! Client-side game state and server synchronization for a human-vs-bot
//! chess page, plus the small authority server it talks to.
//!
//! The client keeps a local copy of the game for instant feedback, records
//! every position in a navigable timeline, and reconciles each move with the
//! server: confirmed moves gain the opponent's reply, refused moves roll back.

pub mod authority;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod session;
pub mod sync;

pub use error::{ConfigError, GameError, SyncError};
