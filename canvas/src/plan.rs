//! Draw plan: the ordered geometric instructions a renderer executes.
//!
//! The plan is plain data so it can be painted onto a 2D context
//! ([`crate::render`]), serialized for a remote renderer, or inspected in
//! tests. Layers, bottom first: arrows, squares with their sockets, then the
//! connection preview line.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use serde::Serialize;

use crate::board::Board;
use crate::geom::Point;
use crate::hit::socket_visible;
use crate::input::InputState;
use crate::options::BoardOptions;
use crate::square::Square;

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Line { from: Point, to: Point, color: String, width: f64 },
    /// Filled triangle.
    Triangle { points: [Point; 3], color: String },
    /// Stroked square outline, already shifted for crisp strokes.
    StrokeRect { x: f64, y: f64, size: f64, width: f64, color: String },
    Circle { center: Point, radius: f64, filled: bool, color: String },
}

/// Everything needed to redraw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawPlan {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// Half-pixel shift that keeps odd-width strokes on pixel boundaries.
#[must_use]
pub fn crisp_offset(stroke_width: f64) -> f64 {
    if (stroke_width % 2.0 - 1.0).abs() < f64::EPSILON { 0.5 } else { 0.0 }
}

/// Build the plan for the current board and gesture.
#[must_use]
pub fn build(board: &Board, input: &InputState) -> DrawPlan {
    let options = board.options();
    let mut commands = Vec::new();

    for arrow in board.arrows() {
        let Some(route) = board.route(arrow) else {
            continue;
        };
        for seg in route.segments {
            commands.push(line(seg.from, seg.to, &options.arrow_color, options));
        }
        commands.push(DrawCommand::Triangle {
            points: [route.head.tip, route.head.left, route.head.right],
            color: options.arrow_color.clone(),
        });
    }

    for square in board.squares() {
        push_square(&mut commands, square, board.is_selected(square.id()), options);
    }

    if let InputState::ConnectingArrow { source, pointer } = input {
        if let Some(from) = board.socket_position(source) {
            commands.push(line(from, *pointer, &options.preview_color, options));
        }
    }

    DrawPlan { width: options.canvas_width, height: options.canvas_height, commands }
}

fn push_square(commands: &mut Vec<DrawCommand>, square: &Square, selected: bool, options: &BoardOptions) {
    let width = options.square_border_width;
    let shift = crisp_offset(width);
    let pos = square.position();
    let (stroke, socket_color) = if selected {
        (&options.selected_square_stroke_color, &options.selected_socket_color)
    } else {
        (&options.square_stroke_color, &options.socket_color)
    };

    commands.push(DrawCommand::StrokeRect {
        x: pos.x + shift,
        y: pos.y + shift,
        size: square.size(),
        width,
        color: stroke.clone(),
    });

    for socket in square.sockets() {
        if !socket_visible(square, socket.alignment, selected) {
            continue;
        }
        commands.push(DrawCommand::Circle {
            center: socket.position,
            radius: options.socket_radius,
            filled: socket.enabled,
            color: socket_color.clone(),
        });
    }
}

fn line(from: Point, to: Point, color: &str, options: &BoardOptions) -> DrawCommand {
    DrawCommand::Line { from, to, color: color.to_owned(), width: options.square_border_width }
}
