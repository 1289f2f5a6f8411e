//! Active board and workspace selection.
//!
//! Process-lifetime defaults used when a caller omits an ID. Each field is
//! a single scalar behind its own lock, so concurrent writers simply race
//! and the last write wins.

use crate::{TrelloError, TrelloResult};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct ActiveSelection {
    board_id: RwLock<Option<String>>,
    workspace_id: RwLock<Option<String>>,
}

impl ActiveSelection {
    /// Create a selection seeded with optional defaults.
    pub fn new(board_id: Option<String>, workspace_id: Option<String>) -> Self {
        Self {
            board_id: RwLock::new(non_empty(board_id)),
            workspace_id: RwLock::new(non_empty(workspace_id)),
        }
    }

    /// Get the active board ID.
    pub fn board_id(&self) -> Option<String> {
        self.board_id.read().clone()
    }

    /// Get the active workspace ID.
    pub fn workspace_id(&self) -> Option<String> {
        self.workspace_id.read().clone()
    }

    pub fn set_board(&self, board_id: impl Into<String>) {
        *self.board_id.write() = Some(board_id.into());
    }

    pub fn set_workspace(&self, workspace_id: impl Into<String>) {
        *self.workspace_id.write() = Some(workspace_id.into());
    }

    /// Pick the explicit board ID, falling back to the active one.
    ///
    /// An empty explicit ID counts as omitted.
    pub fn resolve_board(&self, explicit: Option<&str>) -> TrelloResult<String> {
        explicit
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.board_id())
            .ok_or_else(|| {
                TrelloError::Precondition(
                    "No board specified and no active board is set.".to_string(),
                )
            })
    }

    /// Pick the explicit workspace ID, falling back to the active one.
    pub fn resolve_workspace(&self, explicit: Option<&str>) -> TrelloResult<String> {
        explicit
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.workspace_id())
            .ok_or_else(|| {
                TrelloError::Precondition(
                    "No workspace specified and no active workspace is set.".to_string(),
                )
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
