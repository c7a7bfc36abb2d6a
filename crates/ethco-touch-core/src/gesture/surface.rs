//! Long-press detection on the editing surface.

use super::{GestureOutcome, GesturePhase};
use crate::host::TimerId;
use crate::overlay::OverlayContext;
use crate::selection::SelectionSnapshot;
use kurbo::Point;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// One touch-start to touch-end sequence.
#[derive(Debug, Clone)]
struct GestureSession {
    start_point: Point,
    origin: Instant,
    pending_timer: Option<TimerId>,
    generation: u64,
    phase: GesturePhase,
}

/// Touch interpreter for the editing surface.
///
/// A press held still for the long-press delay selects the word under the
/// finger, or places the cursor and forces the toolbar open on empty space.
/// Moving past the tolerance hands the sequence to the widget as a pan.
pub struct SurfaceGestures {
    ctx: Rc<OverlayContext>,
    this: Weak<SurfaceGestures>,
    session: RefCell<Option<GestureSession>>,
    generation: Cell<u64>,
    last_outcome: Cell<Option<GestureOutcome>>,
}

impl SurfaceGestures {
    pub fn new(ctx: Rc<OverlayContext>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            ctx,
            this: this.clone(),
            session: RefCell::new(None),
            generation: Cell::new(0),
            last_outcome: Cell::new(None),
        })
    }

    /// Phase of the current sequence.
    pub fn phase(&self) -> GesturePhase {
        self.session
            .borrow()
            .as_ref()
            .map_or(GesturePhase::Idle, |session| session.phase)
    }

    /// Classification of the most recently finished sequence.
    pub fn last_outcome(&self) -> Option<GestureOutcome> {
        self.last_outcome.get()
    }

    /// A finger touched the editing surface. `touch_count` is the number of
    /// fingers currently down.
    pub fn touch_start(&self, touch_count: usize, point: Point) {
        let previous = self.session.borrow_mut().take();
        if let Some(previous) = previous {
            self.cancel_timer(previous.pending_timer);
        }

        if touch_count != 1 {
            log::debug!("Multi-touch ({} fingers), ignoring sequence", touch_count);
            self.last_outcome.set(Some(GestureOutcome::Aborted));
            return;
        }

        self.ctx.intent().release();
        self.ctx.hide_toolbar();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let this = self.this.clone();
        let timer = self.ctx.platform().schedule(
            self.ctx.config().long_press_delay(),
            Box::new(move || {
                if let Some(gestures) = this.upgrade() {
                    gestures.long_press_elapsed(generation);
                }
            }),
        );

        *self.session.borrow_mut() = Some(GestureSession {
            start_point: point,
            origin: Instant::now(),
            pending_timer: Some(timer),
            generation,
            phase: GesturePhase::Pressing,
        });
        log::debug!("Press started at ({}, {})", point.x, point.y);
    }

    /// The finger moved. Past the tolerance on either axis the press becomes
    /// a pan and the long-press is abandoned.
    pub fn touch_move(&self, point: Point) {
        let tolerance = self.ctx.config().move_tolerance;
        let timer = {
            let mut guard = self.session.borrow_mut();
            let Some(session) = guard.as_mut() else {
                return;
            };
            if session.phase != GesturePhase::Pressing {
                return;
            }
            let dx = (point.x - session.start_point.x).abs();
            let dy = (point.y - session.start_point.y).abs();
            if dx <= tolerance && dy <= tolerance {
                return;
            }
            session.phase = GesturePhase::Cancelled;
            session.pending_timer.take()
        };
        log::debug!("Press moved past tolerance, treating as pan");
        self.cancel_timer(timer);
    }

    /// The finger lifted. Always returns the machine to idle.
    pub fn touch_end(&self) {
        let Some(session) = self.session.borrow_mut().take() else {
            return;
        };
        self.cancel_timer(session.pending_timer);

        let outcome = match session.phase {
            GesturePhase::Pressing | GesturePhase::Idle => GestureOutcome::Tapped,
            GesturePhase::LongPressed => GestureOutcome::LongPressed,
            GesturePhase::Cancelled => GestureOutcome::Cancelled,
        };
        self.last_outcome.set(Some(outcome));
        log::debug!("Touch sequence ended: {:?}", outcome);
    }

    /// Drop any in-flight sequence without classifying it.
    pub fn reset(&self) {
        let session = self.session.borrow_mut().take();
        if let Some(session) = session {
            self.cancel_timer(session.pending_timer);
        }
    }

    fn cancel_timer(&self, timer: Option<TimerId>) {
        if let Some(timer) = timer {
            self.ctx.platform().cancel(timer);
        }
    }

    fn long_press_elapsed(&self, generation: u64) {
        let (start_point, held) = {
            let mut guard = self.session.borrow_mut();
            let Some(session) = guard
                .as_mut()
                .filter(|s| s.generation == generation && s.phase == GesturePhase::Pressing)
            else {
                log::debug!("Stale long-press timer ignored");
                return;
            };
            session.phase = GesturePhase::LongPressed;
            session.pending_timer = None;
            (session.start_point, session.origin.elapsed())
        };

        let ctx = &self.ctx;
        let host = ctx.host();
        let Some(target) = host.hit_test(start_point) else {
            log::debug!("Long-press outside the document");
            return;
        };

        // Must be set before the widget notifies, or the synchronizer would
        // hide the toolbar on the resulting empty selection.
        ctx.intent().force_open();
        ctx.platform().vibrate(ctx.config().haptic_duration());

        match target.word {
            Some(word) => {
                log::info!(
                    "Long-press ({} ms) selected word at line {}",
                    held.as_millis(),
                    target.position.line
                );
                host.set_selection(SelectionSnapshot::word(target.position.line, word));
                // The widget stays silent when the word was already selected.
                ctx.recompute_overlay();
            }
            None => {
                log::info!(
                    "Long-press ({} ms) on empty space at {}:{}",
                    held.as_millis(),
                    target.position.line,
                    target.position.column
                );
                host.set_cursor(target.position);
                if let Some(point) = host.position_to_screen(target.position) {
                    ctx.show_toolbar_near(point, None);
                }
                ctx.hide_handles();
            }
        }
    }
}
