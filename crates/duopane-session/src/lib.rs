//! Navigation and edit-session state machine for duopane.
//!
//! This crate holds all of the stateful logic behind the explorer and the
//! editor pane. The presentation layer drives a [`Workbench`] with discrete
//! intents and renders whatever state and [`Notification`]s come back.
//!
//! # Overview
//!
//! - [`NavigationState`] - current directory, listing, filter and selection
//! - [`EditSession`] - the single open buffer and its dirty flag
//! - [`SaveController`] - resolves save targets and performs writes
//! - [`UnsavedChangesGate`] - confirmation protocol for actions that would
//!   discard a dirty buffer
//! - [`Workbench`] - owns all of the above and routes intents through them
//!
//! # Example
//!
//! ```rust,no_run
//! use duopane_core::{ListingConfig, OsFileSystem};
//! use duopane_session::{ConfirmChoice, Notification, Workbench};
//!
//! let mut workbench = Workbench::new(OsFileSystem, "/tmp/proj", ListingConfig::default()).unwrap();
//! workbench.request_open("/tmp/proj/readme.md".into());
//! workbench.edit_buffer("# changed\n".to_string());
//! workbench.request_quit();
//!
//! for note in workbench.take_notifications() {
//!     if let Notification::ConfirmationNeeded(prompt) = note {
//!         workbench.resolve_confirmation(prompt, ConfirmChoice::Discard);
//!     }
//! }
//! assert!(workbench.should_quit());
//! ```

mod edit;
mod gate;
mod navigation;
mod notify;
mod save;
mod workbench;

pub use edit::{EditSession, SessionState};
pub use gate::{
    ConfirmChoice, GateDecision, GateOutcome, PendingAction, PromptId, UnsavedChangesGate,
};
pub use navigation::{Entered, NavigationState};
pub use notify::Notification;
pub use save::{SaveController, SaveOutcome};
pub use workbench::Workbench;
