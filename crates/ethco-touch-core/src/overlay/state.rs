//! Rendered overlay state.

use super::handles::{HandleKind, HandleState};
use kurbo::Point;

/// On-screen state of the floating toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolbarState {
    pub visible: bool,
    /// Anchor point (horizontal center, top edge). Only meaningful while `visible`.
    pub anchor: Point,
}

impl ToolbarState {
    /// Where the toolbar is drawn, if it is visible.
    pub fn shown_at(&self) -> Option<Point> {
        self.visible.then_some(self.anchor)
    }
}

/// Everything the overlay currently renders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayState {
    pub start: HandleState,
    pub end: HandleState,
    pub toolbar: ToolbarState,
}

impl OverlayState {
    pub fn handle(&self, kind: HandleKind) -> &HandleState {
        match kind {
            HandleKind::Start => &self.start,
            HandleKind::End => &self.end,
        }
    }

    pub fn handle_mut(&mut self, kind: HandleKind) -> &mut HandleState {
        match kind {
            HandleKind::Start => &mut self.start,
            HandleKind::End => &mut self.end,
        }
    }

    /// Check if either handle is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.start.dragging || self.end.dragging
    }
}
