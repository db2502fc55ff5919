//! Save button feedback and user confirmations.

use std::time::{Duration, Instant};

/// Phase of the save button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed,
}

/// Save button state machine: `Idle -> Saving -> Saved | Failed -> Idle`.
///
/// The button is disabled outside `Idle`; the result stays visible for
/// `feedback` before returning to `Idle`.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    state: SaveState,
    since: Option<Instant>,
    feedback: Duration,
}

impl Default for SaveIndicator {
    fn default() -> Self {
        Self::new(Self::FEEDBACK)
    }
}

impl SaveIndicator {
    pub const FEEDBACK: Duration = Duration::from_secs(1);

    pub fn new(feedback: Duration) -> Self {
        Self {
            state: SaveState::Idle,
            since: None,
            feedback,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == SaveState::Idle
    }

    /// Enter `Saving`. Returns false if a save is already in flight or its
    /// result is still being shown.
    pub fn begin(&mut self) -> bool {
        if self.state != SaveState::Idle {
            return false;
        }
        self.state = SaveState::Saving;
        self.since = None;
        true
    }

    /// Record the outcome of the save started with [`Self::begin`].
    pub fn finish(&mut self, success: bool, now: Instant) {
        if self.state != SaveState::Saving {
            return;
        }
        self.state = if success { SaveState::Saved } else { SaveState::Failed };
        self.since = Some(now);
    }

    /// Return to `Idle` once the feedback period has passed. Returns true on change.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.state, self.since) {
            (SaveState::Saved | SaveState::Failed, Some(since))
                if now.saturating_duration_since(since) >= self.feedback =>
            {
                self.state = SaveState::Idle;
                self.since = None;
                true
            }
            _ => false,
        }
    }

    /// Remaining feedback time, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.since
            .map(|since| self.feedback.saturating_sub(now.saturating_duration_since(since)))
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            SaveState::Idle => "Save",
            SaveState::Saving => "Saving...",
            SaveState::Saved => "Saved!",
            SaveState::Failed => "Error!",
        }
    }
}

/// Blocking user dialogs provided by the host.
pub trait UserPrompt {
    /// Ask a yes/no question. Destructive actions only proceed on `true`.
    fn confirm(&self, message: &str) -> bool;

    /// Show a non-fatal message.
    fn alert(&self, message: &str);
}
