//! Dragging the selection handles.

use crate::overlay::{HandleKind, OverlayContext};
use kurbo::Point;
use std::rc::Rc;

/// Drag interpreter for the two selection handles.
///
/// Each handle is independently `Idle` or `Dragging`; the flag lives in the
/// shared overlay state so recomputes never lose it.
pub struct HandleDrag {
    ctx: Rc<OverlayContext>,
}

impl HandleDrag {
    pub fn new(ctx: Rc<OverlayContext>) -> Self {
        Self { ctx }
    }

    /// A finger touched `kind`'s handle.
    pub fn begin(&self, kind: HandleKind) {
        log::debug!("Dragging {:?} handle", kind);
        self.ctx.set_dragging(kind, true);
    }

    /// Check if any handle is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.ctx.state().is_dragging()
    }

    /// A finger moved anywhere on the page. Returns `true` when a drag
    /// consumed the move.
    ///
    /// The point is lifted by `handle_drag_lift` so the text under the handle
    /// glyph, not under the finger, is targeted. Moves that hit no document
    /// position are ignored.
    pub fn drag_to(&self, point: Point) -> bool {
        let state = self.ctx.state();
        let dragging: Vec<HandleKind> = HandleKind::ALL
            .into_iter()
            .filter(|kind| state.handle(*kind).dragging)
            .collect();
        if dragging.is_empty() {
            return false;
        }

        let host = self.ctx.host();
        let lifted = Point::new(point.x, point.y - self.ctx.config().handle_drag_lift);
        for kind in dragging {
            let Some(target) = host.hit_test(lifted) else {
                continue;
            };
            let Some(current) = host.selection() else {
                continue;
            };
            host.set_selection(kind.moved(&current, target.position));
        }
        true
    }

    /// The finger lifted; every handle returns to idle.
    pub fn end(&self) {
        for kind in HandleKind::ALL {
            self.ctx.set_dragging(kind, false);
        }
    }
}
