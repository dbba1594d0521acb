//! Application constants.

/// Number of items to move when pressing Page Up/Down.
pub const PAGE_SIZE: usize = 10;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Spaces inserted by Tab in the editor unless configured otherwise.
pub const DEFAULT_TAB_SIZE: usize = 4;
