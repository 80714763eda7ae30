//! Shared numeric and style defaults for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in pixels.
pub const CANVAS_WIDTH: f64 = 500.0;

/// Default canvas height in pixels.
pub const CANVAS_HEIGHT: f64 = 500.0;

// ── Squares ─────────────────────────────────────────────────────

/// Edge length of a freshly created square.
pub const DEFAULT_SQUARE_SIZE: f64 = 50.0;

/// Exclusive lower bound for a square's edge length.
pub const MIN_SQUARE_SIZE: f64 = 30.0;

/// Exclusive upper bound for a square's edge length.
pub const MAX_SQUARE_SIZE: f64 = 150.0;

/// Stroke width of the square outline.
pub const SQUARE_BORDER_WIDTH: f64 = 1.0;

/// Size change applied per wheel notch.
pub const RESIZE_STEP_OF_MOUSE_WHEEL: f64 = 5.0;

// ── Sockets and arrows ──────────────────────────────────────────

/// Radius of a socket glyph; also its hit half-extent.
pub const SOCKET_RADIUS: f64 = 5.0;

/// Length of the arrowhead triangle along the approach direction.
pub const ARROWHEAD_LENGTH: f64 = 10.0;

// ── Input ───────────────────────────────────────────────────────

/// A press released within this many milliseconds counts as a click.
pub const QUICK_CLICK_THRESHOLD_MS: f64 = 200.0;

// ── Colors ──────────────────────────────────────────────────────

pub const SQUARE_STROKE_COLOR: &str = "#000";
pub const SELECTED_SQUARE_STROKE_COLOR: &str = "red";
pub const SOCKET_COLOR: &str = "#000";
pub const SELECTED_SOCKET_COLOR: &str = "red";
pub const ARROW_COLOR: &str = "#1F1A17";
pub const PREVIEW_COLOR: &str = "#888";
