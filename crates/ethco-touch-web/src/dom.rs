//! The page elements the overlay renders into.

use crate::error::BindingError;
use crate::options::DomIds;
use ethco_touch_core::{HandleKind, OverlaySurface};
use kurbo::Point;
use std::cell::Cell;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

const TOAST_VISIBLE_CLASS: &str = "show";

/// Look up an element by id.
pub fn element_by_id(document: &Document, id: &str) -> Result<HtmlElement, BindingError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| BindingError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| BindingError::MissingElement(id.to_string()))
}

/// Show `element` with the given display mode at `point`, or hide it.
fn place(element: &HtmlElement, display: &str, point: Option<Point>) {
    let style = element.style();
    let result = match point {
        Some(point) => style
            .set_property("display", display)
            .and_then(|_| style.set_property("top", &format!("{}px", point.y)))
            .and_then(|_| style.set_property("left", &format!("{}px", point.x))),
        None => style.set_property("display", "none"),
    };
    if let Err(e) = result {
        log::warn!("Failed to update overlay element style: {:?}", e);
    }
}

/// Transient notification element.
struct Toast {
    element: HtmlElement,
    duration: Duration,
    pending: Cell<Option<i32>>,
    dismiss: Closure<dyn FnMut()>,
}

impl Toast {
    fn new(element: HtmlElement, duration: Duration) -> Self {
        let target = element.clone();
        let dismiss = Closure::<dyn FnMut()>::new(move || {
            let _ = target.class_list().remove_1(TOAST_VISIBLE_CLASS);
        });
        Self {
            element,
            duration,
            pending: Cell::new(None),
            dismiss,
        }
    }

    fn show(&self, window: &Window, message: &str) {
        self.element.set_inner_html(message);
        if let Err(e) = self.element.class_list().add_1(TOAST_VISIBLE_CLASS) {
            log::warn!("Failed to show toast: {:?}", e);
            return;
        }
        if let Some(previous) = self.pending.take() {
            window.clear_timeout_with_handle(previous);
        }
        let millis = i32::try_from(self.duration.as_millis()).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.dismiss.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(e) => log::warn!("Failed to schedule toast dismissal: {:?}", e),
        }
    }
}

/// [`OverlaySurface`] over absolutely positioned page elements.
pub struct DomSurface {
    window: Window,
    handle_start: HtmlElement,
    handle_end: HtmlElement,
    toolbar: HtmlElement,
    toast: Option<Toast>,
}

impl DomSurface {
    /// Resolve the overlay elements. The toast element is optional.
    pub fn new(
        window: Window,
        document: &Document,
        ids: &DomIds,
        toast_duration: Duration,
    ) -> Result<Self, BindingError> {
        let toast = match element_by_id(document, &ids.toast) {
            Ok(element) => Some(Toast::new(element, toast_duration)),
            Err(_) => {
                log::warn!("No toast element #{}, notifications go to the log", ids.toast);
                None
            }
        };
        Ok(Self {
            handle_start: element_by_id(document, &ids.handle_start)?,
            handle_end: element_by_id(document, &ids.handle_end)?,
            toolbar: element_by_id(document, &ids.toolbar)?,
            window,
            toast,
        })
    }

    fn handle(&self, kind: HandleKind) -> &HtmlElement {
        match kind {
            HandleKind::Start => &self.handle_start,
            HandleKind::End => &self.handle_end,
        }
    }
}

impl OverlaySurface for DomSurface {
    fn place_handle(&self, kind: HandleKind, position: Option<Point>) {
        place(self.handle(kind), "block", position);
    }

    fn place_toolbar(&self, anchor: Option<Point>) {
        place(&self.toolbar, "flex", anchor);
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn show_toast(&self, message: &str) {
        match &self.toast {
            Some(toast) => toast.show(&self.window, message),
            None => log::info!("{}", message),
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        if let Some(handle) = self.toast.as_ref().and_then(|toast| toast.pending.take()) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
