//! Rendering: paints a [`DrawPlan`] onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a finished plan and produces pixels; it does not read or
//! mutate board state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::geom::Point;
use crate::plan::{DrawCommand, DrawPlan};

/// Clear the canvas and draw every command in order.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, plan: &DrawPlan) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, plan.width, plan.height);
    for command in &plan.commands {
        draw_command(ctx, command)?;
    }
    Ok(())
}

fn draw_command(ctx: &CanvasRenderingContext2d, command: &DrawCommand) -> Result<(), JsValue> {
    match command {
        DrawCommand::Line { from, to, color, width } => {
            draw_line(ctx, *from, *to, color, *width);
        }
        DrawCommand::Triangle { points, color } => {
            draw_triangle(ctx, points, color);
        }
        DrawCommand::StrokeRect { x, y, size, width, color } => {
            ctx.save();
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.stroke_rect(*x, *y, *size, *size);
            ctx.restore();
        }
        DrawCommand::Circle { center, radius, filled, color } => {
            draw_circle(ctx, *center, *radius, *filled, color)?;
        }
    }
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, from: Point, to: Point, color: &str, width: f64) {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
    ctx.restore();
}

fn draw_triangle(ctx: &CanvasRenderingContext2d, points: &[Point; 3], color: &str) {
    let [a, b, c] = points;
    ctx.save();
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.move_to(a.x, a.y);
    ctx.line_to(b.x, b.y);
    ctx.line_to(c.x, c.y);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}

/// Sockets: filled when enabled, outlined otherwise.
fn draw_circle(
    ctx: &CanvasRenderingContext2d,
    center: Point,
    radius: f64,
    filled: bool,
    color: &str,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
    if filled {
        ctx.set_fill_style_str(color);
        ctx.fill();
    } else {
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(1.0);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}
