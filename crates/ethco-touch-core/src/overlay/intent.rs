//! Forced-open toolbar intent.

use std::cell::Cell;

/// Whether the toolbar must stay visible despite an empty selection.
///
/// Set only by a completed long-press that hit the document. Released at the
/// start of every touch sequence and by every toolbar action.
#[derive(Debug, Default)]
pub struct OverlayIntent {
    forced: Cell<bool>,
}

impl OverlayIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_open(&self) {
        if !self.forced.replace(true) {
            log::debug!("Toolbar forced open");
        }
    }

    pub fn release(&self) {
        if self.forced.replace(false) {
            log::debug!("Toolbar force released");
        }
    }

    pub fn is_forced(&self) -> bool {
        self.forced.get()
    }
}
