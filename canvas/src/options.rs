//! Board options: canvas bounds, square limits, socket geometry, and colors.
//!
//! Every field falls back to its default from [`crate::consts`] when absent,
//! so a host can override a single value from a partial JSON object.

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunables shared by every entity on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub square_border_width: f64,
    pub socket_radius: f64,
    pub default_square_size: f64,
    /// Exclusive lower bound for resizes.
    pub min_square_size: f64,
    /// Exclusive upper bound for resizes.
    pub max_square_size: f64,
    pub resize_step: f64,
    /// Press-to-release window, in milliseconds, that selects a square.
    pub click_threshold_ms: f64,
    pub arrowhead_length: f64,
    pub square_stroke_color: String,
    pub selected_square_stroke_color: String,
    pub socket_color: String,
    pub selected_socket_color: String,
    pub arrow_color: String,
    pub preview_color: String,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            square_border_width: SQUARE_BORDER_WIDTH,
            socket_radius: SOCKET_RADIUS,
            default_square_size: DEFAULT_SQUARE_SIZE,
            min_square_size: MIN_SQUARE_SIZE,
            max_square_size: MAX_SQUARE_SIZE,
            resize_step: RESIZE_STEP_OF_MOUSE_WHEEL,
            click_threshold_ms: QUICK_CLICK_THRESHOLD_MS,
            arrowhead_length: ARROWHEAD_LENGTH,
            square_stroke_color: SQUARE_STROKE_COLOR.to_owned(),
            selected_square_stroke_color: SELECTED_SQUARE_STROKE_COLOR.to_owned(),
            socket_color: SOCKET_COLOR.to_owned(),
            selected_socket_color: SELECTED_SOCKET_COLOR.to_owned(),
            arrow_color: ARROW_COLOR.to_owned(),
            preview_color: PREVIEW_COLOR.to_owned(),
        }
    }
}

impl BoardOptions {
    /// Margin kept between a square's top-left corner and the canvas edge.
    #[must_use]
    pub fn edge_margin(&self) -> f64 {
        self.square_border_width / 2.0 + 2.0 * self.socket_radius
    }

    /// Clearance between an arrow path and the square outline.
    #[must_use]
    pub fn arrow_spacing(&self) -> f64 {
        self.socket_radius + self.square_border_width + 1.0
    }

    /// Whether `size` lies strictly between the configured bounds.
    #[must_use]
    pub fn size_in_bounds(&self, size: f64) -> bool {
        size > self.min_square_size && size < self.max_square_size
    }
}
