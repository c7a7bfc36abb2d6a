//! An overlay attached to one editor widget.

use crate::actions::ToolbarActions;
use crate::gesture::{HandleDrag, SurfaceGestures};
use crate::host::{Listener, Subscription};
use crate::overlay::OverlayContext;
use std::rc::{Rc, Weak};

/// Wires the synchronizer to the widget's notifications and owns the gesture
/// interpreters and toolbar handlers for one editor.
pub struct OverlaySession {
    ctx: Rc<OverlayContext>,
    gestures: Rc<SurfaceGestures>,
    handles: HandleDrag,
    actions: ToolbarActions,
    subscriptions: Vec<Subscription>,
}

impl OverlaySession {
    /// Subscribe to the widget and render the initial layout.
    pub fn attach(ctx: OverlayContext) -> Self {
        let ctx = Rc::new(ctx);
        let host = ctx.host();
        let subscriptions = vec![
            host.on_selection_changed(recompute_listener(&ctx)),
            host.on_scroll_changed(recompute_listener(&ctx)),
            host.on_content_changed(recompute_listener(&ctx)),
        ];
        ctx.recompute_overlay();
        log::info!("Touch overlay attached");

        Self {
            gestures: SurfaceGestures::new(ctx.clone()),
            handles: HandleDrag::new(ctx.clone()),
            actions: ToolbarActions::new(ctx.clone()),
            ctx,
            subscriptions,
        }
    }

    pub fn context(&self) -> &Rc<OverlayContext> {
        &self.ctx
    }

    /// Editing-surface gesture interpreter.
    pub fn gestures(&self) -> &SurfaceGestures {
        &self.gestures
    }

    /// Handle drag interpreter.
    pub fn handles(&self) -> &HandleDrag {
        &self.handles
    }

    pub fn actions(&self) -> &ToolbarActions {
        &self.actions
    }

    /// Unsubscribe from the widget, cancel pending timers, and hide the overlay.
    pub fn detach(self) {
        let Self {
            ctx,
            gestures,
            handles,
            subscriptions,
            ..
        } = self;
        gestures.reset();
        handles.end();
        for subscription in subscriptions {
            subscription.dispose();
        }
        ctx.intent().release();
        ctx.hide_all();
        log::info!("Touch overlay detached");
    }
}

fn recompute_listener(ctx: &Rc<OverlayContext>) -> Listener {
    let ctx: Weak<OverlayContext> = Rc::downgrade(ctx);
    Rc::new(move || {
        if let Some(ctx) = ctx.upgrade() {
            ctx.recompute_overlay();
        }
    })
}
