//! Overlay synchronizer: lays out handles and toolbar from live widget state.

use super::context::OverlayContext;
use super::handles::HandleKind;
use crate::config::OverlayConfig;
use kurbo::Point;

/// Toolbar anchor for a selection whose start is at `start`.
///
/// Horizontally centered between `start.x` and `end_x` (or at `start.x` alone),
/// kept `toolbar_edge_margin` away from both viewport edges, and lifted
/// `toolbar_lift` above the start point. The right edge wins on viewports too
/// narrow for both margins.
pub fn toolbar_anchor(
    start: Point,
    end_x: Option<f64>,
    viewport_width: f64,
    config: &OverlayConfig,
) -> Point {
    let mut center_x = match end_x {
        Some(end_x) => (start.x + end_x) / 2.0,
        None => start.x,
    };

    let margin = config.toolbar_edge_margin;
    if center_x < margin {
        center_x = margin;
    }
    if center_x > viewport_width - margin {
        center_x = viewport_width - margin;
    }

    Point::new(center_x, start.y - config.toolbar_lift)
}

impl OverlayContext {
    /// Recompute the handle and toolbar layout from the widget's current
    /// selection and scroll state.
    ///
    /// Idempotent: with no intervening widget change a second call renders
    /// the same layout. Every visible element is placed from a freshly
    /// converted screen point.
    pub fn recompute_overlay(&self) {
        let host = self.host();
        let selection = host.selection();

        let Some(selection) = selection.filter(|s| !s.is_empty()) else {
            self.hide_handles();
            // A forced toolbar follows the cursor; it is hidden while the
            // cursor is off-screen and comes back with it.
            let cursor_point = selection
                .filter(|_| self.intent().is_forced())
                .and_then(|s| host.position_to_screen(s.active));
            match cursor_point {
                Some(point) => self.show_toolbar_near(point, None),
                None => self.hide_toolbar(),
            }
            return;
        };

        let start = host.position_to_screen(selection.start());
        let end = host.position_to_screen(selection.end());
        let (Some(start), Some(end)) = (start, end) else {
            log::debug!("Selection endpoint off-screen, hiding overlay");
            self.hide_all();
            return;
        };

        let line_height = host.line_height();
        self.show_handle(HandleKind::Start, Point::new(start.x, start.y + line_height));
        self.show_handle(HandleKind::End, Point::new(end.x, end.y + line_height));
        self.show_toolbar_near(start, Some(end.x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualPlatform, MemoryEditor, MemorySurface};
    use crate::selection::{Position, SelectionSnapshot};
    use kurbo::Rect;
    use std::rc::Rc;

    struct Fixture {
        editor: Rc<MemoryEditor>,
        surface: Rc<MemorySurface>,
        ctx: OverlayContext,
    }

    fn fixture(text: &str) -> Fixture {
        let editor = Rc::new(MemoryEditor::new(text).with_viewport(Rect::new(0.0, 0.0, 400.0, 100.0)));
        let surface = Rc::new(MemorySurface::new(400.0));
        let ctx = OverlayContext::new(
            editor.clone(),
            surface.clone(),
            Rc::new(ManualPlatform::new()),
            OverlayConfig::default(),
        );
        Fixture { editor, surface, ctx }
    }

    fn select(editor: &MemoryEditor, anchor: (u32, u32), active: (u32, u32)) {
        editor.set_selection_silently(Some(SelectionSnapshot::new(
            Position::new(anchor.0, anchor.1),
            Position::new(active.0, active.1),
        )));
    }

    #[test]
    fn test_toolbar_anchor_centers_between_endpoints() {
        let config = OverlayConfig::default();
        let anchor = toolbar_anchor(Point::new(100.0, 200.0), Some(300.0), 800.0, &config);
        assert_eq!(anchor, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_toolbar_anchor_clamps_to_margins() {
        let config = OverlayConfig::default();
        let left = toolbar_anchor(Point::new(10.0, 100.0), Some(20.0), 800.0, &config);
        assert!((left.x - 90.0).abs() < f64::EPSILON);

        let right = toolbar_anchor(Point::new(790.0, 100.0), None, 800.0, &config);
        assert!((right.x - 710.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_toolbar_anchor_narrow_viewport_does_not_panic() {
        let config = OverlayConfig::default();
        let anchor = toolbar_anchor(Point::new(50.0, 100.0), None, 120.0, &config);
        assert!((anchor.x - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_selection_hides_everything() {
        let f = fixture("the quick brown");
        f.ctx.show_toolbar(Point::new(100.0, 100.0));

        f.ctx.recompute_overlay();

        let state = f.ctx.state();
        assert!(!state.start.visible);
        assert!(!state.end.visible);
        assert!(!state.toolbar.visible);
        assert_eq!(f.surface.toolbar(), None);
    }

    #[test]
    fn test_empty_selection_keeps_forced_toolbar_at_cursor() {
        let f = fixture("the quick brown");
        f.editor.set_selection_silently(Some(SelectionSnapshot::cursor(Position::new(1, 13))));
        f.ctx.intent().force_open();

        f.ctx.recompute_overlay();

        assert!(!f.ctx.state().start.visible);
        // Cursor at x=120, y=0; lifted 50px above.
        assert_eq!(f.surface.toolbar(), Some(Point::new(120.0, -50.0)));
    }

    #[test]
    fn test_selection_places_handles_one_line_below() {
        let f = fixture("the quick brown\nfox jumps");
        select(&f.editor, (1, 5), (2, 4));

        f.ctx.recompute_overlay();

        assert_eq!(f.surface.handle(HandleKind::Start), Some(Point::new(40.0, 20.0)));
        assert_eq!(f.surface.handle(HandleKind::End), Some(Point::new(30.0, 40.0)));
        // Center of 40 and 30 is 35, clamped to the 90px margin.
        assert_eq!(f.surface.toolbar(), Some(Point::new(90.0, -50.0)));
    }

    #[test]
    fn test_backwards_selection_uses_document_order() {
        let f = fixture("the quick brown\nfox jumps");
        select(&f.editor, (2, 4), (1, 5));

        f.ctx.recompute_overlay();

        assert_eq!(f.surface.handle(HandleKind::Start), Some(Point::new(40.0, 20.0)));
        assert_eq!(f.surface.handle(HandleKind::End), Some(Point::new(30.0, 40.0)));
    }

    #[test]
    fn test_off_screen_endpoint_hides_even_when_forced() {
        let f = fixture("l1\nl2\nl3\nl4\nl5\nl6\nl7");
        select(&f.editor, (1, 1), (7, 3));
        f.ctx.intent().force_open();

        // Viewport is 100px tall; line 7 starts at y=120.
        f.ctx.recompute_overlay();

        let state = f.ctx.state();
        assert!(!state.start.visible);
        assert!(!state.end.visible);
        assert!(!state.toolbar.visible);
        // The force survives so the toolbar can come back in view.
        assert!(f.ctx.intent().is_forced());
    }

    #[test]
    fn test_toolbar_follows_viewport_width() {
        let f = fixture("the quick brown fox jumps over the lazy dog");
        select(&f.editor, (1, 20), (1, 30));

        f.ctx.recompute_overlay();
        assert_eq!(f.ctx.state().toolbar.shown_at(), Some(Point::new(240.0, -50.0)));

        f.surface.set_viewport_width(300.0);
        f.ctx.recompute_overlay();
        assert_eq!(f.ctx.state().toolbar.shown_at(), Some(Point::new(210.0, -50.0)));
        assert_eq!(f.surface.toolbar(), Some(Point::new(210.0, -50.0)));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let f = fixture("the quick brown fox");
        select(&f.editor, (1, 5), (1, 10));

        f.ctx.recompute_overlay();
        let first = f.ctx.state();
        f.ctx.recompute_overlay();

        assert_eq!(first, f.ctx.state());
    }

    #[test]
    fn test_recompute_preserves_drag_flag() {
        let f = fixture("the quick brown fox");
        select(&f.editor, (1, 5), (1, 10));
        f.ctx.set_dragging(HandleKind::End, true);

        f.ctx.recompute_overlay();

        assert!(f.ctx.state().end.dragging);
        assert!(f.ctx.state().end.visible);
    }
}
