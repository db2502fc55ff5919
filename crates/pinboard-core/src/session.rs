//! Explicit user/board context handed to the whiteboard at construction.

use serde::{Deserialize, Serialize};

/// Board used when the host does not pick one.
pub const DEFAULT_BOARD_ID: &str = "default";

/// Identity of the user and board a canvas is editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub board_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            board_id: board_id.into(),
        }
    }

    /// Session for the given user on the default board.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self::new(user_id, DEFAULT_BOARD_ID)
    }

    /// Storage key of this session's board document.
    pub fn document_key(&self) -> String {
        crate::storage::board_key(&self.user_id, &self.board_id)
    }
}
