//! Browser services: clipboard, haptics and timers.

use ethco_touch_core::{BoxFuture, Platform, PlatformError, PlatformResult, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDocument, Window};

type TaskTable = Rc<RefCell<HashMap<u32, (i32, Box<dyn FnOnce()>)>>>;

/// [`Platform`] backed by the browser window.
///
/// Scheduled tasks live in a table keyed by timer id; a single dispatcher
/// closure is handed to `setTimeout` with the id as its argument, so no
/// closure is leaked per timer.
pub struct BrowserPlatform {
    window: Window,
    tasks: TaskTable,
    next_id: Cell<u32>,
    dispatcher: Closure<dyn FnMut(JsValue)>,
}

impl BrowserPlatform {
    pub fn new(window: Window) -> Self {
        let tasks: TaskTable = Rc::new(RefCell::new(HashMap::new()));
        let table = tasks.clone();
        let dispatcher = Closure::<dyn FnMut(JsValue)>::new(move |id: JsValue| {
            let Some(id) = id.as_f64() else {
                return;
            };
            let task = table.borrow_mut().remove(&(id as u32));
            if let Some((_, task)) = task {
                task();
            }
        });
        Self {
            window,
            tasks,
            next_id: Cell::new(1),
            dispatcher,
        }
    }
}

impl Platform for BrowserPlatform {
    fn copy_selection(&self) -> PlatformResult<()> {
        let document = self
            .window
            .document()
            .ok_or(PlatformError::Unavailable("document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| PlatformError::Unavailable("HTML document"))?;
        match document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(PlatformError::CommandFailed(
                "copy command was not executed".to_string(),
            )),
            Err(e) => Err(PlatformError::CommandFailed(format!("{:?}", e))),
        }
    }

    fn read_clipboard_text(&self) -> BoxFuture<'static, PlatformResult<String>> {
        let clipboard = self.window.navigator().clipboard();
        Box::pin(async move {
            let promise = clipboard.read_text();
            let text = wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map_err(|e| PlatformError::ClipboardDenied(format!("{:?}", e)))?;
            text.as_string()
                .ok_or_else(|| PlatformError::ClipboardDenied("clipboard held no text".to_string()))
        })
    }

    fn vibrate(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        // Unsupported devices simply return false.
        let _ = self.window.navigator().vibrate_with_duration(millis);
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                self.dispatcher.as_ref().unchecked_ref(),
                millis,
                &JsValue::from(id),
            ) {
            Ok(handle) => {
                self.tasks.borrow_mut().insert(id, (handle, task));
            }
            Err(e) => log::error!("Failed to schedule timer: {:?}", e),
        }
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        let entry = self.tasks.borrow_mut().remove(&id.0);
        if let Some((handle, _)) = entry {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for BrowserPlatform {
    fn drop(&mut self) {
        for (_, (handle, _)) in self.tasks.borrow_mut().drain() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
