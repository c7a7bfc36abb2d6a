//! WASM entry point.

use crate::dom::DomSurface;
use crate::error::BindingError;
use crate::listeners::{self, EventBinding};
use crate::monaco::{CodeEditor, MonacoHost};
use crate::options::AttachOptions;
use crate::platform::BrowserPlatform;
use ethco_touch_core::{OverlayContext, OverlaySession};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized when a second editor is attached.
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn parse_options(options: JsValue) -> Result<AttachOptions, BindingError> {
    let options: AttachOptions = if options.is_undefined() || options.is_null() {
        AttachOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| BindingError::Js(e.to_string()))?
    };
    options.validate()?;
    Ok(options)
}

/// Attach the touch overlay to a Monaco editor.
///
/// `options` is an optional object with `config` and `ids` fields; anything
/// left out takes its default.
#[wasm_bindgen]
pub fn attach(editor: CodeEditor, options: JsValue) -> Result<TouchOverlay, JsValue> {
    init_logging();
    let options = parse_options(options)?;
    let window = web_sys::window().ok_or(BindingError::MissingWindow)?;
    let document = window.document().ok_or(BindingError::MissingWindow)?;

    let surface = DomSurface::new(
        window.clone(),
        &document,
        &options.ids,
        options.config.toast_duration(),
    )?;
    let ctx = OverlayContext::new(
        Rc::new(MonacoHost::new(editor)),
        Rc::new(surface),
        Rc::new(BrowserPlatform::new(window)),
        options.config,
    );
    let session = Rc::new(OverlaySession::attach(ctx));
    let bindings = match listeners::bind(&document, &options.ids, &session) {
        Ok(bindings) => bindings,
        Err(e) => {
            if let Ok(session) = Rc::try_unwrap(session) {
                session.detach();
            }
            return Err(e.into());
        }
    };

    Ok(TouchOverlay {
        session: Some(session),
        bindings,
    })
}

/// Handle returned by [`attach`].
#[wasm_bindgen]
pub struct TouchOverlay {
    session: Option<Rc<OverlaySession>>,
    bindings: Vec<EventBinding>,
}

#[wasm_bindgen]
impl TouchOverlay {
    /// Remove every listener, dispose the editor subscriptions, and hide the
    /// overlay. Calling it twice is a no-op.
    pub fn detach(&mut self) {
        self.bindings.clear();
        let Some(session) = self.session.take() else {
            return;
        };
        match Rc::try_unwrap(session) {
            Ok(session) => session.detach(),
            Err(_) => log::error!("Touch overlay still in use, cannot detach"),
        }
    }

    /// Whether a long-press is keeping the toolbar open.
    #[wasm_bindgen(js_name = isForcedOpen)]
    pub fn is_forced_open(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.context().intent().is_forced())
    }
}
