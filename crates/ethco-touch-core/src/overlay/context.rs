//! Shared overlay context.

use super::handles::HandleKind;
use super::intent::OverlayIntent;
use super::state::OverlayState;
use super::sync::toolbar_anchor;
use crate::config::OverlayConfig;
use crate::host::{EditorHost, OverlaySurface, Platform};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the gesture interpreter and the synchronizer share.
///
/// Constructed once per attached editor. All overlay mutations go through
/// here so the mirrored [`OverlayState`] and the surface never diverge.
pub struct OverlayContext {
    host: Rc<dyn EditorHost>,
    surface: Rc<dyn OverlaySurface>,
    platform: Rc<dyn Platform>,
    intent: OverlayIntent,
    config: OverlayConfig,
    state: RefCell<OverlayState>,
}

impl OverlayContext {
    pub fn new(
        host: Rc<dyn EditorHost>,
        surface: Rc<dyn OverlaySurface>,
        platform: Rc<dyn Platform>,
        config: OverlayConfig,
    ) -> Self {
        Self {
            host,
            surface,
            platform,
            intent: OverlayIntent::new(),
            config,
            state: RefCell::new(OverlayState::default()),
        }
    }

    pub fn host(&self) -> &dyn EditorHost {
        self.host.as_ref()
    }

    pub fn surface(&self) -> &dyn OverlaySurface {
        self.surface.as_ref()
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    pub fn intent(&self) -> &OverlayIntent {
        &self.intent
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Snapshot of what is currently rendered.
    pub fn state(&self) -> OverlayState {
        *self.state.borrow()
    }

    pub fn show_handle(&self, kind: HandleKind, position: Point) {
        {
            let mut state = self.state.borrow_mut();
            let handle = state.handle_mut(kind);
            handle.visible = true;
            handle.position = position;
        }
        self.surface.place_handle(kind, Some(position));
    }

    pub fn hide_handle(&self, kind: HandleKind) {
        self.state.borrow_mut().handle_mut(kind).visible = false;
        self.surface.place_handle(kind, None);
    }

    pub fn hide_handles(&self) {
        for kind in HandleKind::ALL {
            self.hide_handle(kind);
        }
    }

    pub fn set_dragging(&self, kind: HandleKind, dragging: bool) {
        self.state.borrow_mut().handle_mut(kind).dragging = dragging;
    }

    /// Show the toolbar at an exact anchor.
    pub fn show_toolbar(&self, anchor: Point) {
        {
            let mut state = self.state.borrow_mut();
            state.toolbar.visible = true;
            state.toolbar.anchor = anchor;
        }
        self.surface.place_toolbar(Some(anchor));
    }

    /// Show the toolbar above `point`, centered between `point.x` and
    /// `other_x` when given.
    pub fn show_toolbar_near(&self, point: Point, other_x: Option<f64>) {
        let anchor = toolbar_anchor(point, other_x, self.surface.viewport_width(), &self.config);
        self.show_toolbar(anchor);
    }

    pub fn hide_toolbar(&self) {
        self.state.borrow_mut().toolbar.visible = false;
        self.surface.place_toolbar(None);
    }

    /// Hide handles and toolbar.
    pub fn hide_all(&self) {
        self.hide_handles();
        self.hide_toolbar();
    }
}
