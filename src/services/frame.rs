//! Frame loop: feeds input events to the engine and runs its frame callback
//! on a fixed clock.
//!
//! DESIGN
//! ======
//! Input lines and clock ticks are raced on one task, so handlers and frames
//! never overlap. Ready input wins over a due tick; every mutation between
//! two ticks lands in the same frame. The engine publishes (and therefore
//! saves) from inside `frame()`, so a burst of events costs one write.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use std::time::Duration;

use canvas::engine::{Action, EngineCore};
use canvas::plan::DrawPlan;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::HostError;
use crate::services::input;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Events decoded and handed to the engine.
    pub events: usize,
    /// Frames that had something to draw.
    pub frames: usize,
}

/// Drive `core` until `events` ends, then flush a final frame.
///
/// # Errors
///
/// Returns [`HostError`] when reading input or writing a plan fails.
pub async fn run<R, W>(
    core: &mut EngineCore,
    events: R,
    out: &mut W,
    interval: Duration,
    emit_plan: bool,
) -> Result<RunStats, HostError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = events.lines();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats = RunStats::default();
    let mut line_no = 0;

    loop {
        tokio::select! {
            biased;
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                line_no += 1;
                if let Some(event) = input::parse_line(&line, line_no) {
                    stats.events += 1;
                    trace_actions(&core.handle(event));
                }
            }
            _ = ticker.tick() => {
                flush_frame(core, out, emit_plan, &mut stats).await?;
            }
        }
    }

    // Input ended mid-gesture: nothing will ever release the pointer.
    if core.input.captures_pointer() {
        trace_actions(&core.cancel());
    }
    flush_frame(core, out, emit_plan, &mut stats).await?;
    out.flush().await?;
    Ok(stats)
}

async fn flush_frame<W>(core: &mut EngineCore, out: &mut W, emit_plan: bool, stats: &mut RunStats) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    let Some(plan) = core.frame() else {
        return Ok(());
    };
    stats.frames += 1;
    if emit_plan {
        write_plan(out, &plan).await?;
    }
    Ok(())
}

async fn write_plan<W>(out: &mut W, plan: &DrawPlan) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(plan)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await?;
    Ok(())
}

fn trace_actions(actions: &[Action]) {
    for action in actions {
        debug!(?action, "engine action");
    }
}
