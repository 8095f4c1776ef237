use log::debug;

use crate::error::GameError;
use crate::game::Position;
use crate::session::state::NavState;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    position: Position,
    san: Option<String>,
}

/// Chronological log of positions with a display cursor.
///
/// The cursor at the last entry means live play; anywhere else the board is
/// showing a past position and is read-only. The log only grows, except for
/// `truncate_last`, which undoes a move the server refused.
#[derive(Debug, Clone)]
pub struct HistoryTimeline {
    entries: Vec<Entry>,
    cursor: usize,
}

impl HistoryTimeline {
    pub fn new(initial: Position) -> Self {
        Self {
            entries: vec![Entry {
                position: initial,
                san: None,
            }],
            cursor: 0,
        }
    }

    pub fn reset(&mut self, initial: Position) {
        self.entries.clear();
        self.entries.push(Entry {
            position: initial,
            san: None,
        });
        self.cursor = 0;
    }

    /// Records `position`, reached by the move written `san`. Live mode only.
    pub fn append(&mut self, position: Position, san: Option<String>) -> Result<(), GameError> {
        if !self.is_live() {
            return Err(GameError::InvalidTransition(
                "append while reviewing history".to_string(),
            ));
        }
        self.entries.push(Entry { position, san });
        self.cursor = self.entries.len() - 1;
        debug!("Timeline append: {} entries", self.entries.len());
        Ok(())
    }

    pub fn truncate_last(&mut self) -> Result<&Position, GameError> {
        if self.entries.len() <= 1 {
            return Err(GameError::InvalidTransition(
                "truncate a timeline holding only the initial position".to_string(),
            ));
        }
        self.entries.pop();
        self.cursor = self.entries.len() - 1;
        debug!("Timeline truncate: {} entries", self.entries.len());
        Ok(self.current())
    }

    pub fn navigate_to(&mut self, index: usize) -> Result<&Position, GameError> {
        if index >= self.entries.len() {
            return Err(GameError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.cursor = index;
        Ok(self.current())
    }

    pub fn first(&mut self) -> &Position {
        self.cursor = 0;
        self.current()
    }

    pub fn previous(&mut self) -> &Position {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn next(&mut self) -> &Position {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn last(&mut self) -> &Position {
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    pub fn is_live(&self) -> bool {
        self.cursor == self.entries.len() - 1
    }

    /// Position under the cursor.
    pub fn current(&self) -> &Position {
        &self.entries[self.cursor].position
    }

    /// Position at the live end.
    pub fn latest(&self) -> &Position {
        &self.entries[self.entries.len() - 1].position
    }

    pub fn get(&self, index: usize) -> Option<&Position> {
        self.entries.get(index).map(|entry| &entry.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn nav_state(&self) -> NavState {
        NavState {
            at_start: self.cursor == 0,
            at_end: self.is_live(),
        }
    }

    /// Notation of every recorded ply, oldest first.
    pub fn moves(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.san.clone())
            .collect()
    }
}
