//! Toolbar actions: copy, paste, and the widget's context menu.

use crate::host::BoxFuture;
use crate::overlay::OverlayContext;
use std::rc::Rc;

/// Buttons on the floating toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Copy,
    Paste,
    More,
}

/// Handlers bound to the toolbar buttons.
///
/// Every action releases the forced-open intent and hides the toolbar.
pub struct ToolbarActions {
    ctx: Rc<OverlayContext>,
}

impl ToolbarActions {
    pub fn new(ctx: Rc<OverlayContext>) -> Self {
        Self { ctx }
    }

    /// Copy the selection through the platform copy command.
    pub fn copy(&self) {
        let ctx = &self.ctx;
        ctx.host().focus();
        match ctx.platform().copy_selection() {
            Ok(()) => ctx.surface().show_toast(&ctx.config().copied_message),
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                ctx.surface().show_toast(&ctx.config().copy_failed_message);
            }
        }
        self.dismiss();
    }

    /// Replace the selection with the clipboard text.
    ///
    /// The toolbar is hidden before this returns. The returned future applies
    /// the edit to whatever the selection is when the clipboard read settles,
    /// or shows a notification if the read is refused. It must be driven to
    /// completion by the caller's executor.
    pub fn paste(&self) -> BoxFuture<'static, ()> {
        let ctx = self.ctx.clone();
        let read = ctx.platform().read_clipboard_text();
        self.dismiss();

        Box::pin(async move {
            match read.await {
                Ok(text) => match ctx.host().selection() {
                    Some(selection) => ctx.host().apply_edit(selection.range(), &text, true),
                    None => log::debug!("Paste dropped: no selection"),
                },
                Err(e) => {
                    log::warn!("Clipboard read failed: {}", e);
                    ctx.surface().show_toast(&ctx.config().clipboard_denied_message);
                }
            }
        })
    }

    /// Open the widget's own context menu.
    pub fn more(&self) {
        self.dismiss();
        self.ctx.host().trigger_context_menu();
    }

    /// Run `action`. Paste is returned as a future; the others complete
    /// synchronously and return `None`.
    pub fn run(&self, action: ToolbarAction) -> Option<BoxFuture<'static, ()>> {
        match action {
            ToolbarAction::Copy => {
                self.copy();
                None
            }
            ToolbarAction::Paste => Some(self.paste()),
            ToolbarAction::More => {
                self.more();
                None
            }
        }
    }

    fn dismiss(&self) {
        self.ctx.intent().release();
        self.ctx.hide_toolbar();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::host::{EditRecord, EditorHost, ManualPlatform, MemoryEditor, MemorySurface, PlatformError};
    use crate::selection::{EditRange, Position, SelectionSnapshot};
    use kurbo::Point;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    struct Fixture {
        editor: Rc<MemoryEditor>,
        surface: Rc<MemorySurface>,
        platform: Rc<ManualPlatform>,
        ctx: Rc<OverlayContext>,
        actions: ToolbarActions,
    }

    fn fixture(text: &str) -> Fixture {
        let editor = Rc::new(MemoryEditor::new(text));
        let surface = Rc::new(MemorySurface::new(400.0));
        let platform = Rc::new(ManualPlatform::new());
        let ctx = Rc::new(OverlayContext::new(
            editor.clone(),
            surface.clone(),
            platform.clone(),
            OverlayConfig::default(),
        ));
        let actions = ToolbarActions::new(ctx.clone());
        Fixture {
            editor,
            surface,
            platform,
            ctx,
            actions,
        }
    }

    fn open_toolbar(ctx: &OverlayContext) {
        ctx.intent().force_open();
        ctx.show_toolbar(Point::new(120.0, 50.0));
    }

    #[test]
    fn test_copy_shows_confirmation_and_dismisses() {
        let f = fixture("the quick brown");
        f.editor.set_selection(SelectionSnapshot::new(Position::new(1, 5), Position::new(1, 10)));
        open_toolbar(&f.ctx);

        f.actions.copy();

        assert_eq!(f.editor.focus_count(), 1);
        assert_eq!(f.platform.copies(), 1);
        assert_eq!(f.surface.toasts(), vec!["Copied".to_string()]);
        assert_eq!(f.surface.toolbar(), None);
        assert!(!f.ctx.intent().is_forced());
    }

    #[test]
    fn test_copy_failure_reports_it() {
        let f = fixture("text");
        f.platform
            .set_copy_result(Err(PlatformError::CommandFailed("rejected".to_string())));
        open_toolbar(&f.ctx);

        f.actions.copy();

        assert_eq!(f.surface.toasts(), vec!["Copy failed".to_string()]);
        assert!(!f.ctx.state().toolbar.visible);
    }

    #[test]
    fn test_paste_replaces_selection() {
        let f = fixture("the quick brown");
        f.editor.set_selection(SelectionSnapshot::new(Position::new(1, 3), Position::new(1, 7)));
        f.platform.set_clipboard(Ok("X".to_string()));
        open_toolbar(&f.ctx);

        let pending = f.actions.paste();

        // Hidden optimistically, before the clipboard settles.
        assert_eq!(f.surface.toolbar(), None);
        assert!(!f.ctx.intent().is_forced());
        assert!(f.editor.edits().is_empty());

        block_on(pending);

        assert_eq!(
            f.editor.edits(),
            vec![EditRecord {
                range: EditRange {
                    start: Position::new(1, 3),
                    end: Position::new(1, 7),
                },
                text: "X".to_string(),
                move_markers: true,
            }]
        );
        assert_eq!(f.editor.text(), "thXick brown");
        assert_eq!(
            f.editor.selection(),
            Some(SelectionSnapshot::cursor(Position::new(1, 4)))
        );
    }

    #[test]
    fn test_paste_applies_to_selection_at_settlement() {
        let f = fixture("the quick brown");
        f.editor.set_selection(SelectionSnapshot::new(Position::new(1, 1), Position::new(1, 4)));
        f.platform.set_clipboard(Ok("a".to_string()));

        let pending = f.actions.paste();
        f.editor.set_selection(SelectionSnapshot::new(Position::new(1, 11), Position::new(1, 16)));
        block_on(pending);

        assert_eq!(f.editor.text(), "the quick a");
    }

    #[test]
    fn test_paste_denied_shows_notification() {
        let f = fixture("the quick brown");
        f.platform
            .set_clipboard(Err(PlatformError::ClipboardDenied("NotAllowedError".to_string())));
        open_toolbar(&f.ctx);

        let pending = f.actions.paste();
        assert_eq!(f.surface.toolbar(), None);
        block_on(pending);

        assert!(f.editor.edits().is_empty());
        assert_eq!(
            f.surface.toasts(),
            vec!["Clipboard permission required".to_string()]
        );
    }

    #[test]
    fn test_more_opens_context_menu() {
        let f = fixture("text");
        open_toolbar(&f.ctx);

        assert!(f.actions.run(ToolbarAction::More).is_none());

        assert_eq!(f.editor.context_menu_count(), 1);
        assert_eq!(f.surface.toolbar(), None);
        assert!(!f.ctx.intent().is_forced());
    }
}
