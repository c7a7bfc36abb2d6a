//! DOM listener wiring.
//!
//! Every listener holds a weak reference to the session, so dropping the
//! bindings is enough to make the session uniquely owned again.

use crate::dom::element_by_id;
use crate::error::BindingError;
use crate::options::DomIds;
use ethco_touch_core::{HandleKind, OverlaySession, ToolbarAction};
use kurbo::Point;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, EventTarget, TouchEvent};

/// A registered DOM listener. Removed from its target on drop.
pub struct EventBinding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(TouchEvent)>,
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.event, e);
        }
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    passive: bool,
    handler: impl FnMut(TouchEvent) + 'static,
) -> Result<EventBinding, BindingError> {
    let closure = Closure::<dyn FnMut(TouchEvent)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(EventBinding {
        target: target.clone(),
        event,
        closure,
    })
}

/// Client coordinates of the first active touch.
fn first_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().get(0)?;
    Some(Point::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

/// Attach every listener the overlay needs.
pub fn bind(
    document: &Document,
    ids: &DomIds,
    session: &Rc<OverlaySession>,
) -> Result<Vec<EventBinding>, BindingError> {
    let mut bindings = Vec::new();
    bind_surface(document, ids, session, &mut bindings)?;
    bind_handles(document, ids, session, &mut bindings)?;
    bind_toolbar(document, ids, session, &mut bindings)?;
    log::debug!("Bound {} touch listeners", bindings.len());
    Ok(bindings)
}

fn bind_surface(
    document: &Document,
    ids: &DomIds,
    session: &Rc<OverlaySession>,
    bindings: &mut Vec<EventBinding>,
) -> Result<(), BindingError> {
    let container: EventTarget = element_by_id(document, &ids.container)?.into();

    let weak = Rc::downgrade(session);
    bindings.push(listen(&container, "touchstart", false, move |event| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let count = event.touches().length() as usize;
        match first_touch(&event) {
            Some(point) => session.gestures().touch_start(count, point),
            None => session.gestures().touch_end(),
        }
    })?);

    let weak = Rc::downgrade(session);
    bindings.push(listen(&container, "touchmove", true, move |event| {
        if let (Some(session), Some(point)) = (weak.upgrade(), first_touch(&event)) {
            session.gestures().touch_move(point);
        }
    })?);

    for event in ["touchend", "touchcancel"] {
        let weak = Rc::downgrade(session);
        bindings.push(listen(&container, event, true, move |_| {
            if let Some(session) = weak.upgrade() {
                session.gestures().touch_end();
            }
        })?);
    }
    Ok(())
}

fn bind_handles(
    document: &Document,
    ids: &DomIds,
    session: &Rc<OverlaySession>,
    bindings: &mut Vec<EventBinding>,
) -> Result<(), BindingError> {
    for kind in HandleKind::ALL {
        let id = match kind {
            HandleKind::Start => &ids.handle_start,
            HandleKind::End => &ids.handle_end,
        };
        let handle: EventTarget = element_by_id(document, id)?.into();
        let weak = Rc::downgrade(session);
        bindings.push(listen(&handle, "touchstart", false, move |event| {
            event.prevent_default();
            event.stop_propagation();
            if let Some(session) = weak.upgrade() {
                session.handles().begin(kind);
            }
        })?);
    }

    let document: &EventTarget = document.as_ref();
    let weak = Rc::downgrade(session);
    bindings.push(listen(document, "touchmove", false, move |event| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        if !session.handles().is_dragging() {
            return;
        }
        event.prevent_default();
        if let Some(point) = first_touch(&event) {
            session.handles().drag_to(point);
        }
    })?);

    let weak = Rc::downgrade(session);
    bindings.push(listen(document, "touchend", true, move |_| {
        if let Some(session) = weak.upgrade() {
            session.handles().end();
        }
    })?);
    Ok(())
}

fn bind_toolbar(
    document: &Document,
    ids: &DomIds,
    session: &Rc<OverlaySession>,
    bindings: &mut Vec<EventBinding>,
) -> Result<(), BindingError> {
    let buttons = [
        (&ids.copy_button, ToolbarAction::Copy),
        (&ids.paste_button, ToolbarAction::Paste),
        (&ids.more_button, ToolbarAction::More),
    ];
    for (id, action) in buttons {
        let button: EventTarget = element_by_id(document, id)?.into();
        let weak: Weak<OverlaySession> = Rc::downgrade(session);
        bindings.push(listen(&button, "touchstart", false, move |event| {
            event.prevent_default();
            let Some(session) = weak.upgrade() else {
                return;
            };
            if let Some(pending) = session.actions().run(action) {
                wasm_bindgen_futures::spawn_local(pending);
            }
        })?);
    }
    Ok(())
}
