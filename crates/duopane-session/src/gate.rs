//! Unsaved-changes confirmation protocol.
//!
//! Every action that would throw away a dirty buffer is routed through
//! [`UnsavedChangesGate::guard`]. A clean buffer lets the action through
//! immediately. A dirty one parks the action as pending and issues a
//! [`PromptId`]; the action only runs once the prompt is resolved.
//!
//! The gate holds at most one pending action. A newer gated request
//! replaces whatever is pending (last request wins), and resolutions for a
//! superseded prompt are ignored.

use std::path::PathBuf;

use strum::{Display, EnumIter};
use tracing::debug;

/// Identifier of an open confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptId(pub u64);

/// An action deferred until the unsaved-changes prompt is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the buffer with this file.
    OpenFile(PathBuf),
    /// Replace the buffer with a new, empty one.
    NewBuffer,
    /// Quit the application.
    Quit,
}

/// User's answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ConfirmChoice {
    /// Save the buffer, then continue.
    Save,
    /// Drop the changes and continue.
    Discard,
    /// Keep editing; the action does not happen.
    Cancel,
}

/// Result of guarding an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The buffer is clean; run the action now.
    Proceed(PendingAction),
    /// A prompt was opened; wait for its resolution.
    Awaiting(PromptId),
}

/// What the caller should do after a prompt is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Run the action without saving.
    Proceed(PendingAction),
    /// Save to the buffer's own path; run the action only if that works.
    SaveThenProceed(PendingAction),
    /// Save to this path; run the action (if any) only if that works.
    SaveAsThenProceed {
        path: PathBuf,
        action: Option<PendingAction>,
    },
    /// The buffer has no path; a save path must be supplied first.
    NeedsSavePath,
    /// Nothing happens.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum GateState {
    #[default]
    Idle,
    AwaitingChoice {
        prompt: PromptId,
        action: PendingAction,
    },
    AwaitingSavePath {
        action: Option<PendingAction>,
    },
}

/// Confirmation checkpoint in front of actions that discard the buffer.
#[derive(Debug, Clone, Default)]
pub struct UnsavedChangesGate {
    state: GateState,
    next_prompt: u64,
}

impl UnsavedChangesGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `action` through the gate.
    ///
    /// Any prompt already open is superseded: its action is dropped and,
    /// if the buffer is dirty, a fresh prompt is issued for `action`.
    pub fn guard(&mut self, dirty: bool, action: PendingAction) -> GateOutcome {
        if let Some(stale) = self.pending_action() {
            debug!(?stale, replacement = ?action, "superseding pending action");
        }

        if !dirty {
            self.state = GateState::Idle;
            return GateOutcome::Proceed(action);
        }

        let prompt = PromptId(self.next_prompt);
        self.next_prompt += 1;
        debug!(?action, prompt = prompt.0, "buffer dirty, awaiting confirmation");
        self.state = GateState::AwaitingChoice { prompt, action };
        GateOutcome::Awaiting(prompt)
    }

    /// Resolve the open prompt.
    ///
    /// Returns `None` if `prompt` is not the currently open prompt.
    /// `has_path` tells the gate whether the buffer can be saved without
    /// asking for a path.
    pub fn resolve(
        &mut self,
        prompt: PromptId,
        choice: ConfirmChoice,
        has_path: bool,
    ) -> Option<GateDecision> {
        let GateState::AwaitingChoice {
            prompt: open,
            action,
        } = &self.state
        else {
            return None;
        };
        if *open != prompt {
            debug!(stale = prompt.0, open = open.0, "ignoring resolution of superseded prompt");
            return None;
        }
        let action = action.clone();

        let decision = match choice {
            ConfirmChoice::Cancel => {
                self.state = GateState::Idle;
                GateDecision::Aborted
            }
            ConfirmChoice::Discard => {
                self.state = GateState::Idle;
                GateDecision::Proceed(action)
            }
            ConfirmChoice::Save if has_path => {
                self.state = GateState::Idle;
                GateDecision::SaveThenProceed(action)
            }
            ConfirmChoice::Save => {
                self.state = GateState::AwaitingSavePath {
                    action: Some(action),
                };
                GateDecision::NeedsSavePath
            }
        };

        debug!(%choice, ?decision, "resolved confirmation");
        Some(decision)
    }

    /// Ask for a save path with no action attached (plain save of a new
    /// buffer). Supersedes any open prompt.
    pub fn request_save_path(&mut self) {
        self.state = GateState::AwaitingSavePath { action: None };
    }

    /// Supply the result of the save-path prompt.
    ///
    /// `None` means the user aborted, which cancels the attached action.
    /// Returns `None` if no save path was being awaited.
    pub fn submit_save_path(&mut self, path: Option<PathBuf>) -> Option<GateDecision> {
        // An open confirmation is left alone
        let action = match &mut self.state {
            GateState::AwaitingSavePath { action } => action.take(),
            _ => return None,
        };
        self.state = GateState::Idle;

        Some(match path {
            Some(path) => GateDecision::SaveAsThenProceed { path, action },
            None => GateDecision::Aborted,
        })
    }

    /// Currently open confirmation prompt.
    pub fn open_prompt(&self) -> Option<PromptId> {
        match self.state {
            GateState::AwaitingChoice { prompt, .. } => Some(prompt),
            _ => None,
        }
    }

    /// Whether a save path is being awaited.
    pub fn awaiting_save_path(&self) -> bool {
        matches!(self.state, GateState::AwaitingSavePath { .. })
    }

    /// Action parked behind the gate, if any.
    pub fn pending_action(&self) -> Option<&PendingAction> {
        match &self.state {
            GateState::AwaitingChoice { action, .. } => Some(action),
            GateState::AwaitingSavePath { action } => action.as_ref(),
            GateState::Idle => None,
        }
    }

    /// Whether the gate is waiting for any user input.
    pub fn is_pending(&self) -> bool {
        self.state != GateState::Idle
    }
}
