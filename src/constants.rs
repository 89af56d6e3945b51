//! Application-wide constants for tuning and layout
//!
//! Centralizes magic numbers to make them discoverable.

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Input poll timeout while a generation is in flight, so the spinner animates.
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Lines scrolled by PageUp/PageDown in the response pane.
pub const RESPONSE_PAGE_LINES: u16 = 10;

// === UI Constants ===

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Fixed width of the model/style selector column.
pub const SELECTOR_COLUMN_WIDTH: u16 = 30;

/// Below this width the selectors stack above the editors.
pub const MIN_SIDE_BY_SIDE_WIDTH: u16 = 90;

/// Share of the editor column given to the email input, in percent.
pub const EMAIL_PANE_PERCENT: u16 = 45;

// === Modern Theme Spacing Constants ===

/// Status bar height in lines for modern theme (includes padding).
pub const STATUS_BAR_HEIGHT_MODERN: u16 = 2;

/// Help bar height in lines for modern theme (includes padding).
pub const HELP_BAR_HEIGHT_MODERN: u16 = 2;

/// Horizontal content padding in characters for modern theme.
pub const CONTENT_PADDING_H: u16 = 2;
