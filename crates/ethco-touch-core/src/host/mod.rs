//! Collaborators the overlay drives.
//!
//! - [`EditorHost`]: the text-editing widget, authoritative for the document,
//!   the selection and the scroll offset.
//! - [`OverlaySurface`]: the page elements the handles and toolbar render into.
//! - [`Platform`]: browser services (clipboard, haptics, timers).
//!
//! Every method takes `&self`. Widgets fire change notifications synchronously
//! from inside their mutation calls, so implementations must not hold borrows
//! across a notification.

mod memory;

pub use memory::{EditRecord, ManualPlatform, MemoryEditor, MemorySurface};

use crate::overlay::HandleKind;
use crate::selection::{EditRange, HitTarget, Position, SelectionSnapshot};
use kurbo::Point;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

/// Platform service errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Clipboard access denied: {0}")]
    ClipboardDenied(String),
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Unavailable: {0}")]
    Unavailable(&'static str),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback registered for widget notifications.
pub type Listener = Rc<dyn Fn()>;

/// Registration handle for a widget notification.
///
/// Dropping the handle (or calling [`Subscription::dispose`]) unregisters the
/// listener.
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `dispose` when released.
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Unregister the listener now.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// The embedded text-editing widget.
pub trait EditorHost {
    /// Current selection, or `None` if the widget has no model attached.
    fn selection(&self) -> Option<SelectionSnapshot>;

    /// Screen point of the top-left of `position`'s character cell, or `None`
    /// when the position is scrolled out of the viewport.
    fn position_to_screen(&self, position: Position) -> Option<Point>;

    /// Document position (and word, if any) under a screen point.
    fn hit_test(&self, point: Point) -> Option<HitTarget>;

    fn set_selection(&self, selection: SelectionSnapshot);

    /// Collapse the selection to a cursor at `position`.
    fn set_cursor(&self, position: Position);

    /// Replace `range` with `text` as a single edit. With `move_markers` the
    /// cursor lands after the inserted text.
    fn apply_edit(&self, range: EditRange, text: &str, move_markers: bool);

    /// Height of one text line in pixels.
    fn line_height(&self) -> f64;

    fn focus(&self);

    /// Open the widget's own context menu at the current position.
    fn trigger_context_menu(&self);

    fn on_selection_changed(&self, listener: Listener) -> Subscription;

    fn on_scroll_changed(&self, listener: Listener) -> Subscription;

    fn on_content_changed(&self, listener: Listener) -> Subscription;
}

/// The page elements the overlay renders into. Write-only.
pub trait OverlaySurface {
    /// Show the handle at `position`, or hide it when `None`.
    fn place_handle(&self, kind: HandleKind, position: Option<Point>);

    /// Show the toolbar at `anchor`, or hide it when `None`.
    fn place_toolbar(&self, anchor: Option<Point>);

    /// Width of the visible viewport in pixels.
    fn viewport_width(&self) -> f64;

    /// Show a transient notification.
    fn show_toast(&self, message: &str);
}

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Browser services.
pub trait Platform {
    /// Run the platform copy command on the focused selection.
    fn copy_selection(&self) -> PlatformResult<()>;

    /// Read text from the system clipboard.
    fn read_clipboard_text(&self) -> BoxFuture<'static, PlatformResult<String>>;

    /// Haptic feedback, where the device supports it.
    fn vibrate(&self, duration: Duration);

    /// Run `task` once after `delay`. Never runs it synchronously.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a scheduled task. Unknown or already fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_disposes_once() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        sub.dispose();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscription_disposes_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let counter = count.clone();
            let _sub = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }
}
