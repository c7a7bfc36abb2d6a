//! Document positions and selection snapshots mirrored from the editor widget.
//!
//! The widget owns the selection of record. These are plain copies taken on
//! demand and never cached across notifications.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A position in the document.
///
/// Lines and columns are 1-based, the way the widget reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Word token boundaries on a single line. `end_column` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRange {
    pub start_column: u32,
    pub end_column: u32,
}

impl WordRange {
    pub const fn new(start_column: u32, end_column: u32) -> Self {
        Self {
            start_column,
            end_column,
        }
    }
}

/// Result of hit-testing a screen point against the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    /// Document position under the point.
    pub position: Position,
    /// Word token at that position, if the point is on one.
    pub word: Option<WordRange>,
}

/// A normalized document range (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditRange {
    pub start: Position,
    pub end: Position,
}

impl EditRange {
    /// Check if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Copy of the widget's current selection.
///
/// `anchor` is where the selection started and `active` is where the caret
/// sits. Either may come first in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionSnapshot {
    pub anchor: Position,
    pub active: Position,
}

impl SelectionSnapshot {
    /// Create a selection from an anchor and an active position.
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// A cursor-only selection at `position`.
    pub const fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    /// A selection spanning `word` on `line`.
    pub const fn word(line: u32, word: WordRange) -> Self {
        Self::new(
            Position::new(line, word.start_column),
            Position::new(line, word.end_column),
        )
    }

    /// Check if this is a cursor-only selection.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The endpoint that comes first in the document.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// The endpoint that comes last in the document.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    /// The document range covered by this selection.
    pub fn range(&self) -> EditRange {
        EditRange {
            start: self.start(),
            end: self.end(),
        }
    }

    /// Replace the start endpoint, keeping the end where it is.
    pub fn with_start(&self, position: Position) -> Self {
        Self::new(position, self.end())
    }

    /// Replace the end endpoint, keeping the start where it is.
    pub fn with_end(&self, position: Position) -> Self {
        Self::new(self.start(), position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
        assert_eq!(Position::new(2, 2).max(Position::new(2, 1)), Position::new(2, 2));
    }

    #[test]
    fn test_cursor_is_empty() {
        let sel = SelectionSnapshot::cursor(Position::new(4, 7));
        assert!(sel.is_empty());
        assert!(sel.range().is_empty());
    }

    #[test]
    fn test_backwards_selection_normalizes() {
        let sel = SelectionSnapshot::new(Position::new(5, 3), Position::new(2, 8));
        assert!(!sel.is_empty());
        assert_eq!(sel.start(), Position::new(2, 8));
        assert_eq!(sel.end(), Position::new(5, 3));
    }

    #[test]
    fn test_replacing_endpoints() {
        let sel = SelectionSnapshot::new(Position::new(1, 5), Position::new(1, 10));

        let moved_start = sel.with_start(Position::new(1, 2));
        assert_eq!(moved_start.range().start, Position::new(1, 2));
        assert_eq!(moved_start.range().end, Position::new(1, 10));

        // Dragging the end before the start still yields a valid range.
        let crossed = sel.with_end(Position::new(1, 1));
        assert_eq!(crossed.anchor, Position::new(1, 5));
        assert_eq!(crossed.start(), Position::new(1, 1));
        assert_eq!(crossed.end(), Position::new(1, 5));
    }

    #[test]
    fn test_word_selection() {
        let sel = SelectionSnapshot::word(3, WordRange::new(5, 10));
        assert_eq!(sel.start(), Position::new(3, 5));
        assert_eq!(sel.end(), Position::new(3, 10));
    }
}
