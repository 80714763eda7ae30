use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::arrow::{ArrowId, ConnectionEnd};
use crate::board::Board;
use crate::doc::{self, Document};
use crate::geom::Point;
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, InputEvent, InputState, Timestamp};
use crate::options::BoardOptions;
use crate::plan::{self, DrawPlan};
use crate::render;
use crate::square::{SocketAlignment, SquareId};
use crate::store::{self, DocumentStore};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SquareCreated(SquareId),
    SquareMoved(SquareId),
    SquareResized(SquareId),
    /// A square left the board along with the listed arrows.
    SquareRemoved { id: SquareId, arrows: Vec<ArrowId> },
    /// A socket flag flipped; `arrows` lists cascaded removals.
    SocketToggled { id: SquareId, alignment: SocketAlignment, enabled: bool, arrows: Vec<ArrowId> },
    ArrowCreated(ArrowId),
    ArrowRemoved(ArrowId),
    SelectionChanged(Option<SquareId>),
    /// A gesture started: route every move and release here until
    /// [`Action::ReleasePointer`].
    CapturePointer,
    /// The gesture ended; drop the transient move/release routing.
    ReleasePointer,
    /// Schedule one frame callback, then call [`EngineCore::frame`].
    RenderNeeded,
}

impl Action {
    /// Whether the action reports a change to the persisted board.
    #[must_use]
    pub fn changes_board(&self) -> bool {
        !matches!(self, Self::CapturePointer | Self::ReleasePointer | Self::RenderNeeded)
    }
}

/// At most one redraw is pending at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Mark a redraw as wanted. Returns true only if none was pending, which
    /// is when the host must ask its frame clock for a callback.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending redraw, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Handle returned by [`EngineCore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Document)>;

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Handlers run to completion one at a time; none of them draws. Mutations
/// only request a frame, and [`EngineCore::frame`] builds the plan and
/// publishes the board to subscribers.
pub struct EngineCore {
    pub board: Board,
    pub input: InputState,
    frames: FrameScheduler,
    /// Board changed since the last publication.
    dirty: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_board(Board::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(options: BoardOptions) -> Self {
        Self::with_board(Board::new(options))
    }

    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            input: InputState::Idle,
            frames: FrameScheduler::default(),
            dirty: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Start from whatever `store` holds, or an empty board.
    pub fn load(store: &mut dyn DocumentStore, options: BoardOptions) -> Self {
        Self::with_board(store::load_or_empty(store, options))
    }

    // --- Subscribers ---

    /// Register a callback that receives the board after every frame that
    /// followed a board change. Preview-only and forced redraws publish
    /// nothing.
    pub fn subscribe(&mut self, callback: impl FnMut(&Document) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // --- Frames ---

    /// Ask for a frame without a mutation, e.g. for the first paint.
    pub fn request_redraw(&mut self) -> Vec<Action> {
        self.dispatch(|_, _| true)
    }

    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Frame callback: consume the pending redraw, publish the board if it
    /// changed, and return what to draw. `None` when no redraw was pending.
    pub fn frame(&mut self) -> Option<DrawPlan> {
        if !self.frames.take() {
            return None;
        }
        let plan = plan::build(&self.board, &self.input);
        if std::mem::take(&mut self.dirty) {
            self.publish();
        }
        Some(plan)
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let doc = doc::to_document(&self.board);
        for (_, callback) in &mut self.subscribers {
            callback(&doc);
        }
    }

    // --- Input events ---

    /// Route one abstracted input event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Create { position } => self.on_create(position),
            InputEvent::Press { position, button, timestamp } => self.on_press(position, button, timestamp),
            InputEvent::Move { position } => self.on_move(position),
            InputEvent::Release { timestamp } => self.on_release(timestamp),
            InputEvent::Wheel { position, delta } => self.on_wheel(position, delta),
        }
    }

    /// Add a default square at `position` unless a square is already there.
    /// Selection is left alone.
    pub fn on_create(&mut self, position: Point) -> Vec<Action> {
        self.dispatch(|core, actions| {
            if hit::hit_test(position, &core.board).is_some() {
                return false;
            }
            let id = core.board.add_square(position);
            debug!(square_id = %id, "square created");
            actions.push(Action::SquareCreated(id));
            true
        })
    }

    pub fn on_press(&mut self, position: Point, button: Button, timestamp: Timestamp) -> Vec<Action> {
        self.dispatch(|core, actions| {
            // A press can only arrive mid-drag if the release was lost.
            if matches!(core.input, InputState::DraggingSquare { .. }) {
                core.input = InputState::Idle;
            }
            match hit::hit_test(position, &core.board) {
                None => core.press_empty(actions),
                Some(Hit { square_id, part: HitPart::Body }) => {
                    core.press_body(square_id, position, button, timestamp, actions)
                }
                Some(Hit { square_id, part: HitPart::Socket(alignment) }) => {
                    core.press_socket(ConnectionEnd::new(square_id, alignment), position, button, actions)
                }
            }
        })
    }

    pub fn on_move(&mut self, position: Point) -> Vec<Action> {
        self.dispatch(|core, actions| match &mut core.input {
            InputState::Idle => false,
            InputState::DraggingSquare { id, start_pointer, start_position, .. } => {
                let candidate = *start_position + (position - *start_pointer);
                let id = id.clone();
                if !core.board.move_square(&id, candidate) {
                    return false;
                }
                actions.push(Action::SquareMoved(id));
                true
            }
            InputState::ConnectingArrow { pointer, .. } => {
                *pointer = position;
                true
            }
        })
    }

    /// End a drag. A release soon enough after the press also selects the
    /// square, even if it moved in between.
    pub fn on_release(&mut self, timestamp: Timestamp) -> Vec<Action> {
        self.dispatch(|core, actions| {
            let InputState::DraggingSquare { id, pressed_at, .. } = &core.input else {
                return false;
            };
            let quick = timestamp - *pressed_at < core.board.options().click_threshold_ms;
            let id = id.clone();
            core.input = InputState::Idle;
            if quick && core.board.select(Some(id.clone())) {
                actions.push(Action::SelectionChanged(Some(id)));
                return true;
            }
            false
        })
    }

    /// Resize the selected square by one step when the pointer is over it.
    pub fn on_wheel(&mut self, position: Point, delta: f64) -> Vec<Action> {
        self.dispatch(|core, actions| {
            let step = core.board.options().resize_step;
            let step = if delta > 0.0 {
                step
            } else if delta < 0.0 {
                -step
            } else {
                return false;
            };
            let Some(id) = hit::over_selected(position, &core.board) else {
                return false;
            };
            if !core.board.resize_square(&id, step) {
                return false;
            }
            actions.push(Action::SquareResized(id));
            true
        })
    }

    /// Abandon the current gesture (focus loss, pointer cancel). The square
    /// being dragged stays where it is.
    pub fn cancel(&mut self) -> Vec<Action> {
        self.dispatch(|core, _| {
            let was_connecting = core.input.pending_source().is_some();
            core.input = InputState::Idle;
            was_connecting
        })
    }

    /// Explicitly remove one arrow.
    pub fn remove_arrow(&mut self, id: &ArrowId) -> Vec<Action> {
        self.dispatch(|core, actions| {
            let Some(arrow) = core.board.remove_arrow(id) else {
                return false;
            };
            actions.push(Action::ArrowRemoved(arrow.id));
            true
        })
    }

    // --- Queries ---

    /// The currently selected square, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&SquareId> {
        self.board.selected()
    }

    /// Snapshot of the board in storage form.
    #[must_use]
    pub fn document(&self) -> Document {
        doc::to_document(&self.board)
    }

    // --- Press handling ---

    fn press_empty(&mut self, actions: &mut Vec<Action>) -> bool {
        let cancelled = self.cancel_connection();
        if self.board.select(None) {
            actions.push(Action::SelectionChanged(None));
            return true;
        }
        cancelled
    }

    fn press_body(
        &mut self,
        id: SquareId,
        position: Point,
        button: Button,
        timestamp: Timestamp,
        actions: &mut Vec<Action>,
    ) -> bool {
        let cancelled = self.cancel_connection();
        match button {
            Button::Primary => {
                let Some(square) = self.board.square(&id) else {
                    return cancelled;
                };
                self.input = InputState::DraggingSquare {
                    start_position: square.position(),
                    id,
                    start_pointer: position,
                    pressed_at: timestamp,
                };
                cancelled
            }
            Button::Secondary => {
                let Some(removed) = self.board.remove_square(&id) else {
                    return cancelled;
                };
                debug!(square_id = %id, arrows = removed.arrows.len(), "square removed");
                actions.push(Action::SquareRemoved { id, arrows: removed.arrows.into_iter().map(|a| a.id).collect() });
                if removed.was_selected {
                    actions.push(Action::SelectionChanged(None));
                }
                true
            }
        }
    }

    fn press_socket(&mut self, end: ConnectionEnd, position: Point, button: Button, actions: &mut Vec<Action>) -> bool {
        let Some(square) = self.board.square(&end.square_id) else {
            return false;
        };
        let enabled = square.socket(end.alignment).enabled;

        match (button, enabled) {
            (Button::Primary, false) => self.toggle_socket(end, true, actions),
            (Button::Primary, true) => match self.input.pending_source().cloned() {
                None => {
                    self.input = InputState::ConnectingArrow { source: end, pointer: position };
                    true
                }
                Some(source) if source == end => false,
                Some(source) => match self.board.connect(source, end) {
                    Ok(id) => {
                        debug!(arrow_id = %id, "arrow created");
                        actions.push(Action::ArrowCreated(id));
                        self.input = InputState::Idle;
                        true
                    }
                    Err(e) => {
                        debug!(error = %e, "connection rejected");
                        false
                    }
                },
            },
            // Disabling is reserved for the selected square's sockets.
            (Button::Secondary, true) if !self.board.is_selected(&end.square_id) => false,
            (Button::Secondary, true) => {
                if self.input.pending_source() == Some(&end) {
                    self.input = InputState::Idle;
                }
                self.toggle_socket(end, false, actions)
            }
            (Button::Secondary, false) => false,
        }
    }

    fn toggle_socket(&mut self, end: ConnectionEnd, enabled: bool, actions: &mut Vec<Action>) -> bool {
        let Some(removed) = self.board.set_socket_enabled(&end.square_id, end.alignment, enabled) else {
            return false;
        };
        actions.push(Action::SocketToggled {
            id: end.square_id,
            alignment: end.alignment,
            enabled,
            arrows: removed.into_iter().map(|a| a.id).collect(),
        });
        true
    }

    /// Drop a pending connection. Returns whether one was pending, since its
    /// preview line then needs erasing.
    fn cancel_connection(&mut self) -> bool {
        if self.input.pending_source().is_none() {
            return false;
        }
        self.input = InputState::Idle;
        true
    }

    /// Run one handler body, then append pointer capture changes and at most
    /// one redraw request.
    fn dispatch(&mut self, body: impl FnOnce(&mut Self, &mut Vec<Action>) -> bool) -> Vec<Action> {
        let captured = self.input.captures_pointer();
        let mut actions = Vec::new();
        let redraw = body(self, &mut actions);
        match (captured, self.input.captures_pointer()) {
            (false, true) => actions.push(Action::CapturePointer),
            (true, false) => actions.push(Action::ReleasePointer),
            _ => {}
        }
        if actions.iter().any(Action::changes_board) {
            self.dirty = true;
        }
        if redraw && self.frames.request() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, restoring `saved` when it holds a
    /// valid document.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, options: BoardOptions, saved: Option<&str>) -> Self {
        let board = match saved {
            Some(raw) => doc::load_board(raw, options.clone()).unwrap_or_else(|| Board::new(options)),
            None => Board::new(options),
        };
        Self { canvas, core: EngineCore::with_board(board) }
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        self.core.handle(event)
    }

    /// Frame callback: paint the pending plan, if any.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(plan) = self.core.frame() else {
            return Ok(());
        };
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::paint(&ctx, &plan)
    }
}
