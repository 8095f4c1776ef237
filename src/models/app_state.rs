use std::sync::{Mutex, MutexGuard};

use crate::authority::ArbiterGame;

/// Application state shared between server workers
pub struct AppState {
    pub game: Mutex<ArbiterGame>,
}

impl AppState {
    pub fn new(game: ArbiterGame) -> Self {
        Self {
            game: Mutex::new(game),
        }
    }

    /// Lock the game, recovering it if a handler panicked while holding it
    pub fn game(&self) -> MutexGuard<'_, ArbiterGame> {
        match self.game.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
