//! Selection handle definitions.

use crate::selection::{Position, SelectionSnapshot};
use kurbo::Point;

/// Which selection endpoint a handle tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Start,
    End,
}

impl HandleKind {
    pub const ALL: [HandleKind; 2] = [HandleKind::Start, HandleKind::End];

    /// Stable index for per-handle storage.
    pub fn index(self) -> usize {
        match self {
            HandleKind::Start => 0,
            HandleKind::End => 1,
        }
    }

    /// The endpoint of `selection` this handle sits on.
    pub fn endpoint(self, selection: &SelectionSnapshot) -> Position {
        match self {
            HandleKind::Start => selection.start(),
            HandleKind::End => selection.end(),
        }
    }

    /// `selection` with this handle's endpoint moved to `position`.
    pub fn moved(self, selection: &SelectionSnapshot, position: Position) -> SelectionSnapshot {
        match self {
            HandleKind::Start => selection.with_start(position),
            HandleKind::End => selection.with_end(position),
        }
    }
}

/// On-screen state of one selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandleState {
    pub visible: bool,
    /// Last rendered position. Only meaningful while `visible`.
    pub position: Point,
    /// A finger is currently dragging this handle.
    pub dragging: bool,
}

impl HandleState {
    /// Where the handle is drawn, if it is visible.
    pub fn shown_at(&self) -> Option<Point> {
        self.visible.then_some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_follow_document_order() {
        let sel = SelectionSnapshot::new(Position::new(2, 4), Position::new(1, 1));
        assert_eq!(HandleKind::Start.endpoint(&sel), Position::new(1, 1));
        assert_eq!(HandleKind::End.endpoint(&sel), Position::new(2, 4));
    }

    #[test]
    fn test_moving_start_keeps_end() {
        let sel = SelectionSnapshot::new(Position::new(1, 3), Position::new(1, 8));
        let moved = HandleKind::Start.moved(&sel, Position::new(1, 1));
        assert_eq!(moved.start(), Position::new(1, 1));
        assert_eq!(moved.end(), Position::new(1, 8));
    }

    #[test]
    fn test_hidden_handle_has_no_position() {
        let state = HandleState {
            visible: false,
            position: Point::new(4.0, 4.0),
            dragging: false,
        };
        assert_eq!(state.shown_at(), None);
    }
}
